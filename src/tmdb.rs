use std::sync::Arc;

use serde::Deserialize;

use crate::catalog::{
    ApiError, Bucket, CastMember, GalleryImage, Genre, GenreId, ImageOrigin, MediaKind, MovieDetail,
    MovieId, MovieSummary, Person, PersonId, Trailer, TrendingEntry, TrendingFeed,
};
use crate::settings::AppSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// The gallery shown in the detail modal keeps only the best-rated images.
pub const GALLERY_LIMIT: usize = 20;

fn url_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(byte as char);
            }
            _ => {
                result.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    result
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieResult {
    pub id: MovieId,
    pub title: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
}

impl From<MovieResult> for MovieSummary {
    fn from(result: MovieResult) -> Self {
        Self {
            id: result.id,
            title: result.title.or(result.name).unwrap_or_default(),
            overview: result.overview,
            poster_path: result.poster_path,
            backdrop_path: result.backdrop_path,
            release_date: result.release_date.or(result.first_air_date),
            vote_average: result.vote_average,
            vote_count: result.vote_count,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingListResponse {
    #[serde(default)]
    pub results: Vec<TrendingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendingResult {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub media_type: Option<String>,
    pub poster_path: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
}

impl From<TrendingResult> for TrendingEntry {
    fn from(result: TrendingResult) -> Self {
        let kind = match result.media_type.as_deref() {
            Some("tv") => MediaKind::Tv,
            Some("person") => MediaKind::Person,
            _ => MediaKind::Movie,
        };
        Self {
            id: result.id,
            title: result.title.or(result.name).unwrap_or_default(),
            kind,
            image_path: result.poster_path.or(result.profile_path),
            overview: result.overview,
            release_date: result.release_date.or(result.first_air_date),
            vote_average: result.vote_average,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonListResponse {
    #[serde(default)]
    pub results: Vec<PersonResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonResult {
    pub id: PersonId,
    pub name: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub popularity: f32,
    #[serde(default)]
    pub known_for: Vec<KnownForResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnownForResult {
    pub title: Option<String>,
    pub name: Option<String>,
}

impl From<PersonResult> for Person {
    fn from(result: PersonResult) -> Self {
        Self {
            id: result.id,
            name: result.name,
            profile_path: result.profile_path,
            popularity: result.popularity,
            known_for: result
                .known_for
                .into_iter()
                .filter_map(|k| k.title.or(k.name))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastResult {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub character: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonCreditsResponse {
    #[serde(default)]
    pub cast: Vec<MovieResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub results: Vec<VideoResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideoResult {
    pub key: String,
    #[serde(default)]
    pub name: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub backdrops: Vec<ImageResult>,
    #[serde(default)]
    pub posters: Vec<ImageResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageResult {
    pub file_path: String,
    #[serde(default)]
    pub vote_average: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetailResponse {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    pub tagline: Option<String>,
    pub homepage: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<CompanyResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyResult {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub origin_country: String,
}

impl From<DetailResponse> for MovieDetail {
    fn from(response: DetailResponse) -> Self {
        Self {
            id: response.id,
            title: response.title,
            overview: response.overview,
            release_date: response.release_date,
            vote_average: response.vote_average,
            vote_count: response.vote_count,
            runtime: response.runtime,
            budget: response.budget,
            revenue: response.revenue,
            tagline: response.tagline.filter(|t| !t.is_empty()),
            homepage: response.homepage.filter(|h| !h.is_empty()),
            genres: response.genres,
            production_companies: response
                .production_companies
                .into_iter()
                .map(|c| crate::catalog::ProductionCompany {
                    id: c.id,
                    name: c.name,
                    origin_country: c.origin_country,
                })
                .collect(),
        }
    }
}

/// Only embeddable YouTube trailers and teasers are kept for the videos tab.
pub fn filter_trailers(results: Vec<VideoResult>) -> Vec<Trailer> {
    results
        .into_iter()
        .filter(|v| v.site == "YouTube" && (v.video_type == "Trailer" || v.video_type == "Teaser"))
        .map(|v| Trailer {
            key: v.key,
            name: v.name,
            video_type: v.video_type,
        })
        .collect()
}

/// Merges both image sub-collections, tags each by origin, and keeps the
/// `GALLERY_LIMIT` best-rated entries in descending score order.
pub fn merge_gallery(backdrops: Vec<ImageResult>, posters: Vec<ImageResult>) -> Vec<GalleryImage> {
    let mut images: Vec<GalleryImage> = backdrops
        .into_iter()
        .map(|image| GalleryImage {
            file_path: image.file_path,
            origin: ImageOrigin::Backdrop,
            score: image.vote_average,
        })
        .chain(posters.into_iter().map(|image| GalleryImage {
            file_path: image.file_path,
            origin: ImageOrigin::Poster,
            score: image.vote_average,
        }))
        .collect();
    images.sort_by(|a, b| b.score.total_cmp(&a.score));
    images.truncate(GALLERY_LIMIT);
    images
}

pub async fn fetch_image_bytes(url: String) -> Result<Vec<u8>, String> {
    reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map(|b| b.to_vec())
        .map_err(|e| e.to_string())
}

#[derive(Clone)]
pub enum ImageSize {
    Poster,
    Backdrop,
}

#[derive(Clone)]
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: String,
    http_client: Arc<reqwest::Client>,
}

impl TmdbClient {
    pub fn new(api_key: String, base_url: String, language: String) -> Self {
        Self {
            api_key,
            base_url,
            image_base_url: String::from(IMAGE_BASE_URL),
            language,
            http_client: Arc::new(reqwest::Client::new()),
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(
            settings.api_key.clone(),
            String::from(settings.base_url()),
            settings.language.clone(),
        )
    }

    pub fn image_url(&self, path: &str, size: ImageSize) -> String {
        let size_path = match size {
            ImageSize::Poster => "w500",
            ImageSize::Backdrop => "original",
        };
        format!("{}/{}{}", self.image_base_url, size_path, path)
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}{}?api_key={}&language={}",
            self.base_url, endpoint, self.api_key, self.language
        )
    }

    fn build_url_with_params(&self, endpoint: &str, params: &str) -> String {
        format!("{}&{}", self.build_url(endpoint), params)
    }

    async fn fetch_response(&self, url: &str) -> Result<reqwest::Response, ApiError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match response.status().as_u16() {
            401 => Err(ApiError::Unauthorized),
            429 => Err(ApiError::RateLimit),
            s if s >= 400 => Err(ApiError::Network(format!("HTTP error: {}", s))),
            _ => Ok(response),
        }
    }

    async fn fetch_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ApiError> {
        self.fetch_response(url)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn fetch_movie_list(&self, url: &str) -> Result<Vec<MovieSummary>, ApiError> {
        let response: MovieListResponse = self.fetch_json(url).await?;
        Ok(response
            .results
            .into_iter()
            .map(MovieSummary::from)
            .collect())
    }

    pub async fn movie_bucket(
        &self,
        bucket: Bucket,
        page: u32,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let endpoint = match bucket {
            Bucket::Popular => "/movie/popular",
            Bucket::TopRated => "/movie/top_rated",
            Bucket::Upcoming => "/movie/upcoming",
        };
        let url = self.build_url_with_params(endpoint, &format!("page={}", page));
        self.fetch_movie_list(&url).await
    }

    pub async fn search_movies(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let url = self.build_url_with_params(
            "/search/movie",
            &format!("query={}&page={}", url_encode(query), page),
        );
        self.fetch_movie_list(&url).await
    }

    pub async fn discover_by_genre(
        &self,
        genre_id: GenreId,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let url =
            self.build_url_with_params("/discover/movie", &format!("with_genres={}", genre_id));
        self.fetch_movie_list(&url).await
    }

    pub async fn genre_list(&self) -> Result<Vec<Genre>, ApiError> {
        let response: GenreListResponse =
            self.fetch_json(&self.build_url("/genre/movie/list")).await?;
        Ok(response.genres)
    }

    /// Daily trending across the three feeds, joined all-or-nothing: if any
    /// fetch fails the whole feed fails and no partial data is returned.
    pub async fn trending_feed(&self) -> Result<TrendingFeed, ApiError> {
        let trending_movies_url = self.build_url("/trending/movie/day");
        let (movies, people, all) = tokio::try_join!(
            self.fetch_movie_list(&trending_movies_url),
            self.trending_people(),
            self.trending_all(),
        )?;
        Ok(TrendingFeed { movies, people, all })
    }

    async fn trending_people(&self) -> Result<Vec<Person>, ApiError> {
        let response: PersonListResponse = self
            .fetch_json(&self.build_url("/trending/person/day"))
            .await?;
        Ok(response.results.into_iter().map(Person::from).collect())
    }

    async fn trending_all(&self) -> Result<Vec<TrendingEntry>, ApiError> {
        let response: TrendingListResponse =
            self.fetch_json(&self.build_url("/trending/all/day")).await?;
        Ok(response
            .results
            .into_iter()
            .map(TrendingEntry::from)
            .collect())
    }

    pub async fn popular_people(&self, page: u32) -> Result<Vec<Person>, ApiError> {
        let url = self.build_url_with_params("/person/popular", &format!("page={}", page));
        let response: PersonListResponse = self.fetch_json(&url).await?;
        Ok(response.results.into_iter().map(Person::from).collect())
    }

    pub async fn search_people(&self, query: &str, page: u32) -> Result<Vec<Person>, ApiError> {
        let url = self.build_url_with_params(
            "/search/person",
            &format!("query={}&page={}", url_encode(query), page),
        );
        let response: PersonListResponse = self.fetch_json(&url).await?;
        Ok(response.results.into_iter().map(Person::from).collect())
    }

    pub async fn person_movie_credits(
        &self,
        person_id: PersonId,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        let url = self.build_url(&format!("/person/{}/movie_credits", person_id));
        let response: PersonCreditsResponse = self.fetch_json(&url).await?;
        Ok(response.cast.into_iter().map(MovieSummary::from).collect())
    }

    pub async fn movie_detail(&self, movie_id: MovieId) -> Result<MovieDetail, ApiError> {
        let response: DetailResponse = self
            .fetch_json(&self.build_url(&format!("/movie/{}", movie_id)))
            .await?;
        Ok(MovieDetail::from(response))
    }

    pub async fn movie_credits(&self, movie_id: MovieId) -> Result<Vec<CastMember>, ApiError> {
        let url = self.build_url(&format!("/movie/{}/credits", movie_id));
        let credits: CreditsResponse = self.fetch_json(&url).await?;
        Ok(credits
            .cast
            .into_iter()
            .map(|c| CastMember {
                id: c.id,
                name: c.name,
                character: c.character,
                profile_path: c.profile_path,
                order: c.order,
            })
            .collect())
    }

    pub async fn movie_videos(&self, movie_id: MovieId) -> Result<Vec<Trailer>, ApiError> {
        let url = self.build_url(&format!("/movie/{}/videos", movie_id));
        let response: VideoListResponse = self.fetch_json(&url).await?;
        Ok(filter_trailers(response.results))
    }

    pub async fn movie_images(&self, movie_id: MovieId) -> Result<Vec<GalleryImage>, ApiError> {
        let url = self.build_url(&format!("/movie/{}/images", movie_id));
        let response: ImageListResponse = self.fetch_json(&url).await?;
        Ok(merge_gallery(response.backdrops, response.posters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(path: &str, score: f32) -> ImageResult {
        ImageResult {
            file_path: String::from(path),
            vote_average: score,
        }
    }

    fn video(site: &str, video_type: &str) -> VideoResult {
        VideoResult {
            key: String::from("abc123"),
            name: String::from("Clip"),
            site: String::from(site),
            video_type: String::from(video_type),
        }
    }

    #[test]
    fn gallery_merges_sorts_and_tags_by_origin() {
        let backdrops = vec![image("/b1.jpg", 5.0), image("/b2.jpg", 8.0)];
        let posters = vec![image("/p1.jpg", 9.0), image("/p2.jpg", 3.0)];

        let merged = merge_gallery(backdrops, posters);

        let scores: Vec<f32> = merged.iter().map(|i| i.score).collect();
        assert_eq!(scores, vec![9.0, 8.0, 5.0, 3.0]);
        let origins: Vec<ImageOrigin> = merged.iter().map(|i| i.origin).collect();
        assert_eq!(
            origins,
            vec![
                ImageOrigin::Poster,
                ImageOrigin::Backdrop,
                ImageOrigin::Backdrop,
                ImageOrigin::Poster,
            ]
        );
    }

    #[test]
    fn gallery_truncates_to_limit() {
        let backdrops: Vec<ImageResult> = (0..30)
            .map(|i| image(&format!("/b{}.jpg", i), i as f32))
            .collect();
        let merged = merge_gallery(backdrops, Vec::new());
        assert_eq!(merged.len(), GALLERY_LIMIT);
        assert_eq!(merged[0].score, 29.0);
    }

    #[test]
    fn trailer_filter_keeps_youtube_trailers_and_teasers_only() {
        let videos = vec![
            video("YouTube", "Trailer"),
            video("YouTube", "Teaser"),
            video("YouTube", "Featurette"),
            video("Vimeo", "Trailer"),
        ];
        let trailers = filter_trailers(videos);
        assert_eq!(trailers.len(), 2);
        assert!(trailers.iter().all(|t| t.video_type != "Featurette"));
    }

    #[test]
    fn url_encode_escapes_reserved_characters() {
        assert_eq!(url_encode("dark knight"), "dark%20knight");
        assert_eq!(url_encode("a&b=c"), "a%26b%3Dc");
        assert_eq!(url_encode("safe-1.2_~"), "safe-1.2_~");
    }

    #[test]
    fn image_url_picks_the_size_path_per_variant() {
        let client = TmdbClient::new(
            String::from("test-key"),
            String::from(DEFAULT_BASE_URL),
            String::from("en-US"),
        );
        assert_eq!(
            client.image_url("/poster.jpg", ImageSize::Poster),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            client.image_url("/backdrop.jpg", ImageSize::Backdrop),
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );
    }

    fn mock_client(server: &wiremock::MockServer) -> TmdbClient {
        TmdbClient::new(
            String::from("test-key"),
            server.uri(),
            String::from("en-US"),
        )
    }

    #[tokio::test]
    async fn movie_bucket_sends_key_and_maps_results() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/movie/popular"))
            .and(wiremock::matchers::query_param("api_key", "test-key"))
            .and(wiremock::matchers::query_param("language", "en-US"))
            .and(wiremock::matchers::query_param("page", "1"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "results": [
                        {
                            "id": 603,
                            "title": "The Matrix",
                            "overview": "A hacker learns the truth.",
                            "poster_path": "/matrix.jpg",
                            "release_date": "1999-03-31",
                            "vote_average": 8.2,
                            "vote_count": 21000
                        },
                        {
                            "id": 1399,
                            "name": "Game of Thrones",
                            "first_air_date": "2011-04-17",
                            "vote_average": 8.4
                        }
                    ]
                }),
            ))
            .mount(&server)
            .await;

        let movies = mock_client(&server)
            .movie_bucket(Bucket::Popular, 1)
            .await
            .unwrap();

        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].title, "The Matrix");
        assert_eq!(movies[0].release_year(), Some("1999"));
        // Falls back to `name` / `first_air_date` for non-movie payloads.
        assert_eq!(movies[1].title, "Game of Thrones");
        assert_eq!(movies[1].release_date.as_deref(), Some("2011-04-17"));
    }

    #[tokio::test]
    async fn search_sends_query_parameter() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/search/movie"))
            .and(wiremock::matchers::query_param("query", "dark knight"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "results": [] })),
            )
            .mount(&server)
            .await;

        let movies = mock_client(&server)
            .search_movies("dark knight", 1)
            .await
            .unwrap();
        assert!(movies.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_unauthorized_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = mock_client(&server).genre_list().await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
    }

    #[tokio::test]
    async fn rate_limit_status_maps_to_rate_limit_error() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = mock_client(&server).movie_detail(603).await;
        assert!(matches!(result, Err(ApiError::RateLimit)));
    }

    #[tokio::test]
    async fn trending_feed_fails_when_any_feed_fails() {
        let server = wiremock::MockServer::start().await;
        let feed = serde_json::json!({ "results": [] });
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/trending/movie/day"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(feed.clone()))
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/trending/all/day"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(feed))
            .mount(&server)
            .await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/trending/person/day"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = mock_client(&server).trending_feed().await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn movie_images_merges_both_collections_over_http() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/movie/603/images"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "backdrops": [
                        { "file_path": "/b1.jpg", "vote_average": 5.0 },
                        { "file_path": "/b2.jpg", "vote_average": 8.0 }
                    ],
                    "posters": [
                        { "file_path": "/p1.jpg", "vote_average": 9.0 },
                        { "file_path": "/p2.jpg", "vote_average": 3.0 }
                    ]
                }),
            ))
            .mount(&server)
            .await;

        let images = mock_client(&server).movie_images(603).await.unwrap();
        let paths: Vec<&str> = images.iter().map(|i| i.file_path.as_str()).collect();
        assert_eq!(paths, vec!["/p1.jpg", "/b2.jpg", "/b1.jpg", "/p2.jpg"]);
    }

    #[tokio::test]
    async fn movie_videos_filters_over_http() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/movie/603/videos"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "results": [
                        { "key": "aaa", "name": "Official Trailer", "site": "YouTube", "type": "Trailer" },
                        { "key": "bbb", "name": "Behind the Scenes", "site": "YouTube", "type": "Featurette" },
                        { "key": "ccc", "name": "Teaser", "site": "Vimeo", "type": "Teaser" }
                    ]
                }),
            ))
            .mount(&server)
            .await;

        let trailers = mock_client(&server).movie_videos(603).await.unwrap();
        assert_eq!(trailers.len(), 1);
        assert_eq!(
            trailers[0].youtube_url(),
            "https://www.youtube.com/watch?v=aaa"
        );
    }

    #[tokio::test]
    async fn person_movie_credits_maps_cast_entries() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/person/6384/movie_credits"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(
                serde_json::json!({
                    "cast": [
                        {
                            "id": 603,
                            "title": "The Matrix",
                            "release_date": "1999-03-31",
                            "vote_average": 8.2
                        }
                    ]
                }),
            ))
            .mount(&server)
            .await;

        let credits = mock_client(&server).person_movie_credits(6384).await.unwrap();
        assert_eq!(credits.len(), 1);
        assert_eq!(credits[0].id, 603);
    }
}
