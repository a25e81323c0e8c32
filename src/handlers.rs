use iced::Task;

use crate::catalog::{
    ApiError, Bucket, CastMember, DetailTab, GalleryImage, Genre, ImageOrigin, ListSource,
    Message, MovieId, MovieSummary, Person, PeopleQuery, Tab, Trailer, TrendingFeed,
};
use crate::tmdb::{fetch_image_bytes, ImageSize};
use crate::Cinedex;

/// How many list entries get their artwork prefetched per completed load.
const PREFETCH_LIMIT: usize = 20;

pub fn handle_message(app: &mut Cinedex, message: Message) -> Task<Message> {
    match message {
        Message::Setup(_) => Task::none(),
        Message::TabSelected(tab) => handle_tab_selected(app, tab),
        Message::SearchInputChanged(query) => {
            app.search_query = query;
            Task::none()
        }
        Message::SearchSubmitted => handle_search_submitted(app),
        Message::SearchCleared => handle_search_cleared(app),
        Message::GenreSelected(genre) => handle_genre_selected(app, genre),
        Message::MovieSelected(movie) => handle_movie_selected(app, movie),
        Message::DetailClosed => handle_detail_closed(app),
        Message::DetailTabSelected(tab) => {
            app.detail_tab = tab;
            Task::none()
        }
        Message::TrendingSectionSelected(section) => {
            app.trending_section = section;
            Task::none()
        }
        Message::PersonSelected(person) => handle_person_selected(app, person),
        Message::FilmographyCleared => handle_filmography_cleared(app),
        Message::PeopleQueryChanged(query) => {
            app.people_query = query;
            Task::none()
        }
        Message::PeopleSearchSubmitted => handle_people_search_submitted(app),
        Message::LoadMorePeople => handle_load_more_people(app),
        Message::RetryPressed => handle_retry(app),
        Message::OpenTrailer(url) => handle_open_trailer(url),
        Message::BucketLoaded(bucket, result) => handle_bucket_loaded(app, bucket, result),
        Message::ResultsLoaded(result) => handle_results_loaded(app, result),
        Message::GenresLoaded(result) => {
            if let Some(store) = &mut app.store {
                store.genres_loaded(result);
            }
            Task::none()
        }
        Message::TrendingLoaded(result) => handle_trending_loaded(app, result),
        Message::PeopleLoaded(query, result) => handle_people_loaded(app, query, result),
        Message::DetailLoaded(movie_id, result) => {
            if let Some(store) = &mut app.store {
                store.detail_loaded(movie_id, result);
            }
            Task::none()
        }
        Message::CreditsLoaded(movie_id, result) => handle_credits_loaded(app, movie_id, result),
        Message::VideosLoaded(movie_id, result) => handle_videos_loaded(app, movie_id, result),
        Message::ImagesLoaded(movie_id, result) => handle_images_loaded(app, movie_id, result),
        Message::LoadImage(url) => handle_load_image(app, url),
        Message::ImageLoaded(url, result) => {
            match result {
                Ok(handle) => app.image_cache.insert(url, handle),
                Err(error) => {
                    tracing::debug!(%url, %error, "image fetch failed");
                    app.image_cache.mark_failed(&url);
                }
            }
            Task::none()
        }
    }
}

fn handle_tab_selected(app: &mut Cinedex, tab: Tab) -> Task<Message> {
    app.active_tab = tab;
    app.selected_movie = None;
    if tab != Tab::Genres {
        app.selected_genre = None;
    }
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.reset_media();

    if let Some(bucket) = tab.bucket() {
        return store.load_bucket(bucket);
    }
    match tab {
        Tab::Trending => {
            if store.trending.is_idle() || store.trending.error().is_some() {
                store.load_trending()
            } else {
                Task::none()
            }
        }
        Tab::Genres => store.load_genres(),
        Tab::People => {
            if store.people.is_idle() {
                store.load_people(1)
            } else {
                Task::none()
            }
        }
        _ => Task::none(),
    }
}

fn handle_search_submitted(app: &mut Cinedex) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    app.active_tab = Tab::Search;
    app.selected_genre = None;
    store.search_movies(&app.search_query)
}

fn handle_search_cleared(app: &mut Cinedex) -> Task<Message> {
    app.search_query.clear();
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.search_movies("")
}

fn handle_genre_selected(app: &mut Cinedex, genre: Genre) -> Task<Message> {
    app.selected_genre = Some(genre.clone());
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.filter_by_genre(genre)
}

fn handle_movie_selected(app: &mut Cinedex, movie: MovieSummary) -> Task<Message> {
    app.detail_tab = DetailTab::Info;
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    let load = store.open_movie(&movie);
    let poster = movie.poster_path.clone();
    app.selected_movie = Some(movie);
    Task::batch([load, prefetch_images(app, poster.as_deref(), ImageSize::Poster)])
}

fn handle_detail_closed(app: &mut Cinedex) -> Task<Message> {
    app.selected_movie = None;
    if let Some(store) = &mut app.store {
        store.reset_media();
    }
    Task::none()
}

fn handle_person_selected(app: &mut Cinedex, person: Person) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    let task = store.load_person_filmography(&person);
    app.selected_person = Some(person);
    app.active_tab = Tab::Search;
    task
}

fn handle_filmography_cleared(app: &mut Cinedex) -> Task<Message> {
    app.selected_person = None;
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.clear_results();
    app.active_tab = Tab::People;
    Task::none()
}

fn handle_people_search_submitted(app: &mut Cinedex) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.search_people(&app.people_query)
}

fn handle_load_more_people(app: &mut Cinedex) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    match store.next_people_page() {
        Some(page) => store.load_people(page),
        None => Task::none(),
    }
}

/// Re-issues whichever load the visible error belongs to, based on the active
/// tab and (for the shared results list) its source tag.
fn handle_retry(app: &mut Cinedex) -> Task<Message> {
    if let Some(movie) = app.selected_movie.clone() {
        let Some(store) = &mut app.store else {
            return Task::none();
        };
        return store.open_movie(&movie);
    }

    let Some(store) = &mut app.store else {
        return Task::none();
    };
    if let Some(bucket) = app.active_tab.bucket() {
        return store.load_bucket(bucket);
    }
    match app.active_tab {
        Tab::Trending => store.load_trending(),
        Tab::People => {
            if app.people_query.trim().is_empty() {
                store.load_people(1)
            } else {
                store.search_people(&app.people_query)
            }
        }
        Tab::Search | Tab::Genres => match store.source.clone() {
            ListSource::Bucket(bucket) => store.load_bucket(bucket),
            ListSource::Search(query) => store.search_movies(&query),
            ListSource::Genre(genre) => store.filter_by_genre(genre),
            ListSource::PersonCredits(_) => match app.selected_person.clone() {
                Some(person) => store.load_person_filmography(&person),
                None => Task::none(),
            },
        },
        _ => Task::none(),
    }
}

fn handle_open_trailer(url: String) -> Task<Message> {
    if let Err(error) = open::that(&url) {
        tracing::warn!(%error, url, "failed to open trailer in browser");
    }
    Task::none()
}

fn handle_bucket_loaded(
    app: &mut Cinedex,
    bucket: Bucket,
    result: Result<Vec<MovieSummary>, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.bucket_loaded(bucket, result);
    prefetch_movie_posters(app, |store| store.bucket(bucket).data())
}

fn handle_results_loaded(
    app: &mut Cinedex,
    result: Result<Vec<MovieSummary>, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.results_loaded(result);
    prefetch_movie_posters(app, |store| store.results.data())
}

fn handle_trending_loaded(
    app: &mut Cinedex,
    result: Result<TrendingFeed, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.trending_loaded(result);
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(feed) = store.trending.data() else {
        return Task::none();
    };
    let mut paths: Vec<String> = Vec::new();
    paths.extend(
        feed.movies
            .iter()
            .take(PREFETCH_LIMIT)
            .filter_map(|m| m.poster_path.clone()),
    );
    paths.extend(
        feed.people
            .iter()
            .take(PREFETCH_LIMIT)
            .filter_map(|p| p.profile_path.clone()),
    );
    paths.extend(
        feed.all
            .iter()
            .take(PREFETCH_LIMIT)
            .filter_map(|e| e.image_path.clone()),
    );
    let tasks: Vec<Task<Message>> = paths
        .iter()
        .map(|path| prefetch_images(app, Some(path.as_str()), ImageSize::Poster))
        .collect();
    Task::batch(tasks)
}

fn handle_people_loaded(
    app: &mut Cinedex,
    query: PeopleQuery,
    result: Result<Vec<Person>, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.people_loaded(query, result);
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(people) = store.people.data() else {
        return Task::none();
    };
    let paths: Vec<String> = people
        .iter()
        .rev()
        .take(PREFETCH_LIMIT)
        .filter_map(|p| p.profile_path.clone())
        .collect();
    let tasks: Vec<Task<Message>> = paths
        .iter()
        .map(|path| prefetch_images(app, Some(path.as_str()), ImageSize::Poster))
        .collect();
    Task::batch(tasks)
}

fn handle_credits_loaded(
    app: &mut Cinedex,
    movie_id: MovieId,
    result: Result<Vec<CastMember>, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.credits_loaded(movie_id, result);
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(cast) = store.credits.data() else {
        return Task::none();
    };
    let paths: Vec<String> = cast
        .iter()
        .take(PREFETCH_LIMIT)
        .filter_map(|c| c.profile_path.clone())
        .collect();
    let tasks: Vec<Task<Message>> = paths
        .iter()
        .map(|path| prefetch_images(app, Some(path.as_str()), ImageSize::Poster))
        .collect();
    Task::batch(tasks)
}

fn handle_videos_loaded(
    app: &mut Cinedex,
    movie_id: MovieId,
    result: Result<Vec<Trailer>, ApiError>,
) -> Task<Message> {
    if let Some(store) = &mut app.store {
        store.videos_loaded(movie_id, result);
    }
    Task::none()
}

fn handle_images_loaded(
    app: &mut Cinedex,
    movie_id: MovieId,
    result: Result<Vec<GalleryImage>, ApiError>,
) -> Task<Message> {
    let Some(store) = &mut app.store else {
        return Task::none();
    };
    store.images_loaded(movie_id, result);
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(images) = store.images.data() else {
        return Task::none();
    };
    // Prefetch each image at the size the gallery renders it, so the cache
    // key matches at view time.
    let requests: Vec<(String, ImageSize)> = images
        .iter()
        .map(|image| {
            let size = match image.origin {
                ImageOrigin::Backdrop => ImageSize::Backdrop,
                ImageOrigin::Poster => ImageSize::Poster,
            };
            (image.file_path.clone(), size)
        })
        .collect();
    let tasks: Vec<Task<Message>> = requests
        .iter()
        .map(|(path, size)| prefetch_images(app, Some(path.as_str()), size.clone()))
        .collect();
    Task::batch(tasks)
}

fn prefetch_movie_posters<F>(app: &Cinedex, select: F) -> Task<Message>
where
    F: Fn(&crate::store::CatalogStore) -> Option<&Vec<MovieSummary>>,
{
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(movies) = select(store) else {
        return Task::none();
    };
    let tasks: Vec<Task<Message>> = movies
        .iter()
        .take(PREFETCH_LIMIT)
        .filter_map(|m| m.poster_path.as_deref())
        .map(|path| prefetch_images(app, Some(path), ImageSize::Poster))
        .collect();
    Task::batch(tasks)
}

fn prefetch_images(app: &Cinedex, path: Option<&str>, size: ImageSize) -> Task<Message> {
    let Some(store) = &app.store else {
        return Task::none();
    };
    let Some(path) = path else {
        return Task::none();
    };
    let url = store.client().image_url(path, size);
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    Task::done(Message::LoadImage(url))
}

fn handle_load_image(app: &mut Cinedex, url: String) -> Task<Message> {
    if app.image_cache.get(&url).is_some() || app.image_cache.is_pending(&url) {
        return Task::none();
    }
    app.image_cache.mark_pending(url.clone());
    let image_url = url.clone();
    let cache_path = app.image_cache.get_cache_path(&url);

    Task::perform(
        async move {
            if let Some(ref path) = cache_path {
                if path.exists() {
                    if let Ok(bytes) = tokio::fs::read(path).await {
                        return (image_url, Ok(bytes), cache_path, true);
                    }
                }
            }
            let bytes = fetch_image_bytes(image_url.clone()).await;
            (image_url, bytes, cache_path, false)
        },
        |(url, result, cache_path, from_cache)| match result {
            Ok(bytes) => {
                if !from_cache {
                    if let Some(path) = cache_path {
                        let bytes_clone = bytes.clone();
                        std::thread::spawn(move || {
                            let _ = std::fs::write(path, &bytes_clone);
                        });
                    }
                }
                Message::ImageLoaded(url, Ok(iced::widget::image::Handle::from_bytes(bytes)))
            }
            Err(error) => Message::ImageLoaded(url, Err(error)),
        },
    )
}
