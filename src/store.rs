use std::collections::HashMap;

use iced::task::Handle;
use iced::Task;
use tracing::{debug, warn};

use crate::catalog::{
    ApiError, Bucket, CastMember, GalleryImage, Genre, GenreState, ListSource, Message, MovieDetail,
    MovieId, MovieSummary, Person, PeopleQuery, RequestState, Trailer, TrendingFeed,
};
use crate::tmdb::TmdbClient;

/// Registry key for one independently tracked request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Concern {
    Bucket(Bucket),
    Results,
    Genres,
    Trending,
    People,
    Detail,
    Credits,
    Videos,
    Images,
}

/// Owns every fetched collection and all per-concern request state. The shell
/// and views only read; every mutation flows through the load operations here.
///
/// Starting a load supersedes any in-flight request for the same concern by
/// aborting it, so a slow stale response can never overwrite a newer one.
pub struct CatalogStore {
    client: TmdbClient,
    pub popular: RequestState<Vec<MovieSummary>>,
    pub top_rated: RequestState<Vec<MovieSummary>>,
    pub upcoming: RequestState<Vec<MovieSummary>>,
    pub results: RequestState<Vec<MovieSummary>>,
    pub source: ListSource,
    pub genres: GenreState,
    pub trending: RequestState<TrendingFeed>,
    pub people: RequestState<Vec<Person>>,
    people_query: PeopleQuery,
    media_movie: Option<MovieId>,
    pub detail: RequestState<MovieDetail>,
    pub credits: RequestState<Vec<CastMember>>,
    pub videos: RequestState<Vec<Trailer>>,
    pub images: RequestState<Vec<GalleryImage>>,
    inflight: HashMap<Concern, Handle>,
}

impl CatalogStore {
    pub fn new(client: TmdbClient) -> Self {
        Self {
            client,
            popular: RequestState::Idle,
            top_rated: RequestState::Idle,
            upcoming: RequestState::Idle,
            results: RequestState::Idle,
            source: ListSource::default(),
            genres: GenreState::Idle,
            trending: RequestState::Idle,
            people: RequestState::Idle,
            people_query: PeopleQuery::Popular { page: 1 },
            media_movie: None,
            detail: RequestState::Idle,
            credits: RequestState::Idle,
            videos: RequestState::Idle,
            images: RequestState::Idle,
            inflight: HashMap::new(),
        }
    }

    fn track(&mut self, concern: Concern, handle: Handle) {
        if let Some(previous) = self.inflight.insert(concern, handle) {
            debug!(?concern, "superseding in-flight request");
            previous.abort();
        }
    }

    fn settle(&mut self, concern: Concern) {
        self.inflight.remove(&concern);
    }

    fn abort(&mut self, concern: Concern) {
        if let Some(handle) = self.inflight.remove(&concern) {
            handle.abort();
        }
    }

    pub fn client(&self) -> &TmdbClient {
        &self.client
    }

    pub fn bucket(&self, bucket: Bucket) -> &RequestState<Vec<MovieSummary>> {
        match bucket {
            Bucket::Popular => &self.popular,
            Bucket::TopRated => &self.top_rated,
            Bucket::Upcoming => &self.upcoming,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut RequestState<Vec<MovieSummary>> {
        match bucket {
            Bucket::Popular => &mut self.popular,
            Bucket::TopRated => &mut self.top_rated,
            Bucket::Upcoming => &mut self.upcoming,
        }
    }

    pub fn load_bucket(&mut self, bucket: Bucket) -> Task<Message> {
        self.bucket_mut(bucket).begin();
        let client = self.client.clone();
        let (task, handle) = Task::perform(
            async move { client.movie_bucket(bucket, 1).await },
            move |result| Message::BucketLoaded(bucket, result),
        )
        .abortable();
        self.track(Concern::Bucket(bucket), handle);
        task
    }

    pub fn bucket_loaded(
        &mut self,
        bucket: Bucket,
        result: Result<Vec<MovieSummary>, ApiError>,
    ) {
        self.settle(Concern::Bucket(bucket));
        self.bucket_mut(bucket).resolve(result);
    }

    /// An empty or whitespace query means "clear search": the visible list
    /// falls back to the popular bucket, re-fetched.
    pub fn search_movies(&mut self, query: &str) -> Task<Message> {
        let query = query.trim();
        if query.is_empty() {
            self.abort(Concern::Results);
            self.results = RequestState::Idle;
            self.source = ListSource::Bucket(Bucket::Popular);
            return self.load_bucket(Bucket::Popular);
        }

        self.source = ListSource::Search(String::from(query));
        self.results.begin();
        let client = self.client.clone();
        let owned = String::from(query);
        let (task, handle) = Task::perform(
            async move { client.search_movies(&owned, 1).await },
            Message::ResultsLoaded,
        )
        .abortable();
        self.track(Concern::Results, handle);
        task
    }

    pub fn filter_by_genre(&mut self, genre: Genre) -> Task<Message> {
        let genre_id = genre.id;
        self.source = ListSource::Genre(genre);
        self.results.begin();
        let client = self.client.clone();
        let (task, handle) = Task::perform(
            async move { client.discover_by_genre(genre_id).await },
            Message::ResultsLoaded,
        )
        .abortable();
        self.track(Concern::Results, handle);
        task
    }

    pub fn load_person_filmography(&mut self, person: &Person) -> Task<Message> {
        let person_id = person.id;
        self.source = ListSource::PersonCredits(person.name.clone());
        self.results.begin();
        let client = self.client.clone();
        let (task, handle) = Task::perform(
            async move { client.person_movie_credits(person_id).await },
            Message::ResultsLoaded,
        )
        .abortable();
        self.track(Concern::Results, handle);
        task
    }

    pub fn clear_results(&mut self) {
        self.abort(Concern::Results);
        self.results = RequestState::Idle;
        self.source = ListSource::default();
    }

    pub fn results_loaded(&mut self, result: Result<Vec<MovieSummary>, ApiError>) {
        self.settle(Concern::Results);
        self.results.resolve(result);
    }

    /// Fetched once per session; repeating the call after a successful load is
    /// a no-op.
    pub fn load_genres(&mut self) -> Task<Message> {
        if matches!(self.genres, GenreState::Loaded(_) | GenreState::Loading) {
            return Task::none();
        }
        self.genres = GenreState::Loading;
        let client = self.client.clone();
        let (task, handle) = Task::perform(
            async move { client.genre_list().await },
            Message::GenresLoaded,
        )
        .abortable();
        self.track(Concern::Genres, handle);
        task
    }

    pub fn genres_loaded(&mut self, result: Result<Vec<Genre>, ApiError>) {
        self.settle(Concern::Genres);
        self.genres = match result {
            Ok(genres) => GenreState::Loaded(genres),
            Err(error) => {
                // Degrades the genre filter instead of blocking the main UI.
                warn!(%error, "genre list failed to load");
                GenreState::Degraded
            }
        };
    }

    pub fn load_trending(&mut self) -> Task<Message> {
        self.trending.begin();
        let client = self.client.clone();
        let (task, handle) = Task::perform(
            async move { client.trending_feed().await },
            Message::TrendingLoaded,
        )
        .abortable();
        self.track(Concern::Trending, handle);
        task
    }

    pub fn trending_loaded(&mut self, result: Result<TrendingFeed, ApiError>) {
        self.settle(Concern::Trending);
        self.trending.resolve(result);
    }

    pub fn load_people(&mut self, page: u32) -> Task<Message> {
        self.people.begin();
        let client = self.client.clone();
        let query = PeopleQuery::Popular { page };
        let (task, handle) = Task::perform(
            async move { client.popular_people(page).await },
            move |result| Message::PeopleLoaded(query.clone(), result),
        )
        .abortable();
        self.track(Concern::People, handle);
        task
    }

    pub fn search_people(&mut self, query: &str) -> Task<Message> {
        let query = query.trim();
        if query.is_empty() {
            return self.load_people(1);
        }
        self.people.begin();
        let client = self.client.clone();
        let owned = String::from(query);
        let message_query = PeopleQuery::Search(owned.clone());
        let (task, handle) = Task::perform(
            async move { client.search_people(&owned, 1).await },
            move |result| Message::PeopleLoaded(message_query.clone(), result),
        )
        .abortable();
        self.track(Concern::People, handle);
        task
    }

    pub fn people_loaded(&mut self, query: PeopleQuery, result: Result<Vec<Person>, ApiError>) {
        self.settle(Concern::People);
        match (&query, result) {
            // Later pages of the popular listing append instead of replacing.
            (PeopleQuery::Popular { page }, Ok(batch)) if *page > 1 => {
                let mut combined = match std::mem::take(&mut self.people) {
                    RequestState::Loading(Some(existing)) => existing,
                    _ => Vec::new(),
                };
                combined.extend(batch);
                self.people = RequestState::Loaded(combined);
            }
            (_, result) => self.people.resolve(result),
        }
        self.people_query = query;
    }

    pub fn next_people_page(&self) -> Option<u32> {
        match (&self.people_query, &self.people) {
            (PeopleQuery::Popular { page }, RequestState::Loaded(_)) => Some(page + 1),
            _ => None,
        }
    }

    /// Resets the modal concerns, then issues the four independent fetches for
    /// the selected movie: details, credits, videos and images.
    pub fn open_movie(&mut self, movie: &MovieSummary) -> Task<Message> {
        self.reset_media();
        self.media_movie = Some(movie.id);
        self.detail.begin();
        self.credits.begin();
        self.videos.begin();
        self.images.begin();

        let movie_id = movie.id;

        let client = self.client.clone();
        let (detail, detail_handle) = Task::perform(
            async move { client.movie_detail(movie_id).await },
            move |result| Message::DetailLoaded(movie_id, result),
        )
        .abortable();
        self.track(Concern::Detail, detail_handle);

        let client = self.client.clone();
        let (credits, credits_handle) = Task::perform(
            async move { client.movie_credits(movie_id).await },
            move |result| Message::CreditsLoaded(movie_id, result),
        )
        .abortable();
        self.track(Concern::Credits, credits_handle);

        let client = self.client.clone();
        let (videos, videos_handle) = Task::perform(
            async move { client.movie_videos(movie_id).await },
            move |result| Message::VideosLoaded(movie_id, result),
        )
        .abortable();
        self.track(Concern::Videos, videos_handle);

        let client = self.client.clone();
        let (images, images_handle) = Task::perform(
            async move { client.movie_images(movie_id).await },
            move |result| Message::ImagesLoaded(movie_id, result),
        )
        .abortable();
        self.track(Concern::Images, images_handle);

        Task::batch([detail, credits, videos, images])
    }

    /// Returns all four modal concerns to their initial state and aborts any
    /// fetch still in flight for them.
    pub fn reset_media(&mut self) {
        for concern in [
            Concern::Detail,
            Concern::Credits,
            Concern::Videos,
            Concern::Images,
        ] {
            self.abort(concern);
        }
        self.media_movie = None;
        self.detail = RequestState::Idle;
        self.credits = RequestState::Idle;
        self.videos = RequestState::Idle;
        self.images = RequestState::Idle;
    }

    pub fn detail_loaded(&mut self, movie_id: MovieId, result: Result<MovieDetail, ApiError>) {
        if self.media_movie != Some(movie_id) {
            return;
        }
        self.settle(Concern::Detail);
        self.detail.resolve(result);
    }

    pub fn credits_loaded(
        &mut self,
        movie_id: MovieId,
        result: Result<Vec<CastMember>, ApiError>,
    ) {
        if self.media_movie != Some(movie_id) {
            return;
        }
        self.settle(Concern::Credits);
        self.credits.resolve(result);
    }

    pub fn videos_loaded(&mut self, movie_id: MovieId, result: Result<Vec<Trailer>, ApiError>) {
        if self.media_movie != Some(movie_id) {
            return;
        }
        self.settle(Concern::Videos);
        self.videos.resolve(result);
    }

    pub fn images_loaded(
        &mut self,
        movie_id: MovieId,
        result: Result<Vec<GalleryImage>, ApiError>,
    ) {
        if self.media_movie != Some(movie_id) {
            return;
        }
        self.settle(Concern::Images);
        self.images.resolve(result);
    }

    #[cfg(test)]
    fn inflight_count(&self) -> usize {
        self.inflight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> CatalogStore {
        let client = TmdbClient::new(
            String::from("test-key"),
            String::from("http://localhost:1"),
            String::from("en-US"),
        );
        CatalogStore::new(client)
    }

    fn movie(id: MovieId, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: String::from(title),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 7.0,
            vote_count: 10,
        }
    }

    #[test]
    fn bucket_load_ends_in_exactly_one_terminal_state() {
        let mut s = store();
        let _ = s.load_bucket(Bucket::Popular);
        assert!(s.popular.is_loading());

        s.bucket_loaded(Bucket::Popular, Ok(vec![movie(1, "Heat")]));
        assert!(s.popular.is_loaded());
        assert!(s.popular.error().is_none());

        let _ = s.load_bucket(Bucket::Popular);
        s.bucket_loaded(Bucket::Popular, Err(ApiError::Network(String::from("down"))));
        assert!(!s.popular.is_loading());
        assert!(s.popular.error().is_some());
        // The last good list stays available behind the error banner.
        assert_eq!(s.popular.data().map(Vec::len), Some(1));
    }

    #[test]
    fn empty_search_falls_back_to_popular_bucket() {
        let mut s = store();
        let _ = s.search_movies("batman");
        assert_eq!(s.source, ListSource::Search(String::from("batman")));
        s.results_loaded(Ok(vec![movie(2, "Batman")]));
        assert!(s.results.is_loaded());

        let _ = s.search_movies("   ");
        assert_eq!(s.source, ListSource::Bucket(Bucket::Popular));
        assert!(s.results.is_idle());
        assert!(s.popular.is_loading());
    }

    #[test]
    fn trending_failure_retains_no_partial_data() {
        let mut s = store();
        let _ = s.load_trending();
        s.trending_loaded(Err(ApiError::RateLimit));
        assert!(s.trending.error().is_some());
        assert!(s.trending.data().is_none());
    }

    #[test]
    fn reset_media_returns_all_modal_concerns_to_idle() {
        let mut s = store();
        let selected = movie(42, "Alien");
        let _ = s.open_movie(&selected);
        assert!(s.detail.is_loading());
        assert!(s.images.is_loading());

        s.reset_media();
        assert!(s.detail.is_idle());
        assert!(s.credits.is_idle());
        assert!(s.videos.is_idle());
        assert!(s.images.is_idle());
        assert_eq!(s.inflight_count(), 0);
    }

    #[test]
    fn stale_modal_completion_is_ignored_after_reset() {
        let mut s = store();
        let selected = movie(42, "Alien");
        let _ = s.open_movie(&selected);
        s.reset_media();

        s.detail_loaded(
            42,
            Ok(MovieDetail {
                id: 42,
                title: String::from("Alien"),
                overview: String::new(),
                release_date: None,
                vote_average: 8.5,
                vote_count: 100,
                runtime: Some(117),
                budget: 0,
                revenue: 0,
                tagline: None,
                homepage: None,
                genres: Vec::new(),
                production_companies: Vec::new(),
            }),
        );
        assert!(s.detail.is_idle());
    }

    #[test]
    fn genre_failure_degrades_instead_of_erroring() {
        let mut s = store();
        let _ = s.load_genres();
        s.genres_loaded(Err(ApiError::Network(String::from("down"))));
        assert!(s.genres.is_degraded());
        assert!(s.genres.genres().is_empty());
    }

    #[test]
    fn genre_load_is_idempotent_once_loaded() {
        let mut s = store();
        let _ = s.load_genres();
        let genres = vec![
            Genre {
                id: 28,
                name: String::from("Action"),
            },
            Genre {
                id: 35,
                name: String::from("Comedy"),
            },
        ];
        s.genres_loaded(Ok(genres.clone()));
        let _ = s.load_genres();
        assert_eq!(s.genres, GenreState::Loaded(genres));
    }

    #[test]
    fn people_pagination_appends_later_pages() {
        let mut s = store();
        let _ = s.load_people(1);
        s.people_loaded(
            PeopleQuery::Popular { page: 1 },
            Ok(vec![
                Person {
                    id: 1,
                    name: String::from("A"),
                    profile_path: None,
                    popularity: 1.0,
                    known_for: Vec::new(),
                },
                Person {
                    id: 2,
                    name: String::from("B"),
                    profile_path: None,
                    popularity: 2.0,
                    known_for: Vec::new(),
                },
            ]),
        );
        assert_eq!(s.next_people_page(), Some(2));

        let _ = s.load_people(2);
        s.people_loaded(
            PeopleQuery::Popular { page: 2 },
            Ok(vec![Person {
                id: 3,
                name: String::from("C"),
                profile_path: None,
                popularity: 3.0,
                known_for: Vec::new(),
            }]),
        );
        assert_eq!(s.people.data().map(Vec::len), Some(3));
        assert_eq!(s.next_people_page(), Some(3));
    }

    #[test]
    fn people_search_replaces_and_disables_pagination() {
        let mut s = store();
        let _ = s.search_people("nolan");
        s.people_loaded(
            PeopleQuery::Search(String::from("nolan")),
            Ok(vec![Person {
                id: 9,
                name: String::from("Nolan"),
                profile_path: None,
                popularity: 5.0,
                known_for: Vec::new(),
            }]),
        );
        assert_eq!(s.people.data().map(Vec::len), Some(1));
        assert_eq!(s.next_people_page(), None);
    }

    #[test]
    fn reloading_a_concern_supersedes_the_prior_request() {
        let mut s = store();
        let _ = s.load_bucket(Bucket::Popular);
        let _ = s.load_bucket(Bucket::Popular);
        // Only one live request per concern; the first was aborted.
        assert_eq!(s.inflight_count(), 1);
    }
}
