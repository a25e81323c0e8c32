use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use iced::widget::image::Handle;
use iced::Color;
use serde::Deserialize;

pub const BACKGROUND_DARK: Color = Color::from_rgb(0.067, 0.09, 0.125);
pub const SURFACE_GRAY: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const ACCENT_AMBER: Color = Color::from_rgb(0.984, 0.749, 0.141);
pub const ERROR_RED: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_GRAY: Color = Color::from_rgb(0.702, 0.702, 0.702);

pub type MovieId = u64;
pub type PersonId = u64;
pub type GenreId = u64;

fn simple_hash(s: &str) -> String {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    format!("{:016x}", hash)
}

fn get_cache_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|home| {
        PathBuf::from(home)
            .join(".cache")
            .join("cinedex")
            .join("images")
    })
}

/// Per-concern request lifecycle. `Loading` and `Failed` carry the last
/// successfully loaded value so the view can keep rendering it while a refresh
/// is in flight or behind an error banner.
#[derive(Debug, Clone, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Loading(Option<T>),
    Loaded(T),
    Failed {
        error: String,
        stale: Option<T>,
    },
}

impl<T> RequestState<T> {
    pub fn begin(&mut self) {
        let stale = std::mem::take(self).into_data();
        *self = RequestState::Loading(stale);
    }

    pub fn resolve(&mut self, result: Result<T, ApiError>) {
        let stale = std::mem::take(self).into_data();
        *self = match result {
            Ok(data) => RequestState::Loaded(data),
            Err(error) => RequestState::Failed {
                error: error.to_string(),
                stale,
            },
        };
    }

    fn into_data(self) -> Option<T> {
        match self {
            RequestState::Idle => None,
            RequestState::Loading(stale) => stale,
            RequestState::Loaded(data) => Some(data),
            RequestState::Failed { stale, .. } => stale,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            RequestState::Idle => None,
            RequestState::Loading(stale) => stale.as_ref(),
            RequestState::Loaded(data) => Some(data),
            RequestState::Failed { stale, .. } => stale.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, RequestState::Loaded(_))
    }
}

/// Genre list lifecycle. A failed load degrades the genre filter instead of
/// blocking the rest of the UI, and the degraded status is rendered at low
/// visual priority rather than swallowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GenreState {
    #[default]
    Idle,
    Loading,
    Loaded(Vec<Genre>),
    Degraded,
}

impl GenreState {
    pub fn genres(&self) -> &[Genre] {
        match self {
            GenreState::Loaded(genres) => genres,
            _ => &[],
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, GenreState::Degraded)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Popular,
    TopRated,
    Upcoming,
}

impl Bucket {
    pub fn title(self) -> &'static str {
        match self {
            Bucket::Popular => "Popular Movies",
            Bucket::TopRated => "Top Rated Movies",
            Bucket::Upcoming => "Upcoming Movies",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Popular,
    Search,
    Trending,
    Genres,
    People,
    TopRated,
    Upcoming,
}

impl Tab {
    pub const ALL: [Tab; 7] = [
        Tab::Popular,
        Tab::Search,
        Tab::Trending,
        Tab::Genres,
        Tab::People,
        Tab::TopRated,
        Tab::Upcoming,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Popular => "Popular",
            Tab::Search => "Search",
            Tab::Trending => "Trending",
            Tab::Genres => "Genres",
            Tab::People => "People",
            Tab::TopRated => "Top Rated",
            Tab::Upcoming => "Upcoming",
        }
    }

    pub fn bucket(self) -> Option<Bucket> {
        match self {
            Tab::Popular => Some(Bucket::Popular),
            Tab::TopRated => Some(Bucket::TopRated),
            Tab::Upcoming => Some(Bucket::Upcoming),
            _ => None,
        }
    }
}

/// Which operation most recently populated the shared results list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSource {
    Bucket(Bucket),
    Search(String),
    Genre(Genre),
    PersonCredits(String),
}

impl Default for ListSource {
    fn default() -> Self {
        ListSource::Bucket(Bucket::Popular)
    }
}

impl ListSource {
    pub fn heading(&self) -> String {
        match self {
            ListSource::Bucket(bucket) => String::from(bucket.title()),
            ListSource::Search(query) => format!("Search Results for \"{}\"", query),
            ListSource::Genre(genre) => format!("{} Movies", genre.name),
            ListSource::PersonCredits(name) => format!("Films with {}", name),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
}

impl MovieSummary {
    pub fn release_year(&self) -> Option<&str> {
        self.release_date.as_deref().and_then(|d| d.get(..4))
    }
}

#[derive(Debug, Clone)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: f32,
    pub vote_count: u32,
    pub runtime: Option<u32>,
    pub budget: u64,
    pub revenue: u64,
    pub tagline: Option<String>,
    pub homepage: Option<String>,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
}

#[derive(Debug, Clone)]
pub struct ProductionCompany {
    pub id: u64,
    pub name: String,
    pub origin_country: String,
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub profile_path: Option<String>,
    pub popularity: f32,
    pub known_for: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CastMember {
    pub id: PersonId,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
    pub order: u32,
}

#[derive(Debug, Clone)]
pub struct Trailer {
    pub key: String,
    pub name: String,
    pub video_type: String,
}

impl Trailer {
    pub fn youtube_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOrigin {
    Backdrop,
    Poster,
}

impl ImageOrigin {
    pub fn label(self) -> &'static str {
        match self {
            ImageOrigin::Backdrop => "Backdrop",
            ImageOrigin::Poster => "Poster",
        }
    }
}

#[derive(Debug, Clone)]
pub struct GalleryImage {
    pub file_path: String,
    pub origin: ImageOrigin,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Tv,
    Person,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
            MediaKind::Person => "person",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrendingEntry {
    pub id: u64,
    pub title: String,
    pub kind: MediaKind,
    pub image_path: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub vote_average: f32,
}

impl TrendingEntry {
    /// Movies in the mixed trending feed can still open the detail modal.
    pub fn to_movie(&self) -> Option<MovieSummary> {
        if self.kind != MediaKind::Movie {
            return None;
        }
        Some(MovieSummary {
            id: self.id,
            title: self.title.clone(),
            overview: self.overview.clone(),
            poster_path: self.image_path.clone(),
            backdrop_path: None,
            release_date: self.release_date.clone(),
            vote_average: self.vote_average,
            vote_count: 0,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrendingFeed {
    pub movies: Vec<MovieSummary>,
    pub people: Vec<Person>,
    pub all: Vec<TrendingEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingSection {
    Movies,
    People,
    All,
}

impl TrendingSection {
    pub const ALL: [TrendingSection; 3] = [
        TrendingSection::Movies,
        TrendingSection::People,
        TrendingSection::All,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TrendingSection::Movies => "Movies",
            TrendingSection::People => "People",
            TrendingSection::All => "All",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Info,
    Cast,
    Videos,
    Images,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Info,
        DetailTab::Cast,
        DetailTab::Videos,
        DetailTab::Images,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DetailTab::Info => "Info",
            DetailTab::Cast => "Cast",
            DetailTab::Videos => "Videos",
            DetailTab::Images => "Images",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeopleQuery {
    Popular { page: u32 },
    Search(String),
}

#[derive(Debug, Clone)]
pub enum ApiError {
    Network(String),
    Parse(String),
    RateLimit,
    Unauthorized,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(message) => write!(f, "network error: {}", message),
            ApiError::Parse(message) => write!(f, "invalid response: {}", message),
            ApiError::RateLimit => write!(f, "rate limited by the movie API"),
            ApiError::Unauthorized => write!(f, "API key was rejected"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    cache_directory: Option<PathBuf>,
}

impl ImageCache {
    pub fn new() -> Self {
        let cache_directory = get_cache_dir();
        if let Some(ref dir) = cache_directory {
            let _ = std::fs::create_dir_all(dir);
        }
        Self {
            cache: HashMap::new(),
            pending: HashSet::new(),
            cache_directory,
        }
    }

    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.cache.get(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn is_pending(&self, url: &str) -> bool {
        self.pending.contains(url)
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    /// Drops a failed fetch from the pending set so a later request for the
    /// same URL is allowed to try again.
    pub fn mark_failed(&mut self, url: &str) {
        self.pending.remove(url);
    }

    pub fn get_cache_path(&self, url: &str) -> Option<PathBuf> {
        self.cache_directory
            .as_ref()
            .map(|dir| dir.join(simple_hash(url)))
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Setup(crate::settings::SetupMessage),
    TabSelected(Tab),
    SearchInputChanged(String),
    SearchSubmitted,
    SearchCleared,
    GenreSelected(Genre),
    MovieSelected(MovieSummary),
    DetailClosed,
    DetailTabSelected(DetailTab),
    TrendingSectionSelected(TrendingSection),
    PersonSelected(Person),
    FilmographyCleared,
    PeopleQueryChanged(String),
    PeopleSearchSubmitted,
    LoadMorePeople,
    RetryPressed,
    OpenTrailer(String),
    BucketLoaded(Bucket, Result<Vec<MovieSummary>, ApiError>),
    ResultsLoaded(Result<Vec<MovieSummary>, ApiError>),
    GenresLoaded(Result<Vec<Genre>, ApiError>),
    TrendingLoaded(Result<TrendingFeed, ApiError>),
    PeopleLoaded(PeopleQuery, Result<Vec<Person>, ApiError>),
    DetailLoaded(MovieId, Result<MovieDetail, ApiError>),
    CreditsLoaded(MovieId, Result<Vec<CastMember>, ApiError>),
    VideosLoaded(MovieId, Result<Vec<Trailer>, ApiError>),
    ImagesLoaded(MovieId, Result<Vec<GalleryImage>, ApiError>),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(items: &[&str]) -> RequestState<Vec<String>> {
        RequestState::Loaded(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn failed_image_fetch_clears_pending_so_it_can_retry() {
        let mut cache = ImageCache::default();
        cache.mark_pending(String::from("https://img/w500/a.jpg"));
        assert!(cache.is_pending("https://img/w500/a.jpg"));
        cache.mark_failed("https://img/w500/a.jpg");
        assert!(!cache.is_pending("https://img/w500/a.jpg"));
        assert!(cache.get("https://img/w500/a.jpg").is_none());
    }

    #[test]
    fn begin_keeps_previous_data_visible() {
        let mut state = loaded(&["a", "b"]);
        state.begin();
        assert!(state.is_loading());
        assert_eq!(state.data().map(Vec::len), Some(2));
    }

    #[test]
    fn resolve_success_replaces_data() {
        let mut state = loaded(&["old"]);
        state.begin();
        state.resolve(Ok(vec![String::from("new")]));
        assert!(state.is_loaded());
        assert_eq!(state.data().and_then(|d| d.first()).map(String::as_str), Some("new"));
        assert!(state.error().is_none());
    }

    #[test]
    fn resolve_failure_keeps_stale_data_and_sets_error() {
        let mut state = loaded(&["old"]);
        state.begin();
        state.resolve(Err(ApiError::Network(String::from("timed out"))));
        assert!(!state.is_loading());
        assert!(state.error().is_some());
        assert_eq!(state.data().map(Vec::len), Some(1));
    }

    #[test]
    fn failure_from_idle_has_no_data() {
        let mut state: RequestState<Vec<String>> = RequestState::Idle;
        state.begin();
        state.resolve(Err(ApiError::RateLimit));
        assert!(state.data().is_none());
        assert_eq!(state.error(), Some("rate limited by the movie API"));
    }

    #[test]
    fn trending_entry_only_movies_open_the_modal() {
        let entry = TrendingEntry {
            id: 7,
            title: String::from("Someone Famous"),
            kind: MediaKind::Person,
            image_path: None,
            overview: String::new(),
            release_date: None,
            vote_average: 0.0,
        };
        assert!(entry.to_movie().is_none());

        let movie = TrendingEntry {
            kind: MediaKind::Movie,
            title: String::from("A Movie"),
            ..entry
        };
        assert_eq!(movie.to_movie().map(|m| m.id), Some(7));
    }
}
