mod cards;
mod catalog;
mod detail_popup;
mod handlers;
mod settings;
mod shell;
mod store;
mod tmdb;

use iced::widget::container;
use iced::{Element, Font, Length, Size, Task, Theme};
use tracing_subscriber::EnvFilter;

use catalog::{
    Bucket, DetailTab, Genre, ImageCache, Message, MovieSummary, Person, Tab, TrendingSection,
    BACKGROUND_DARK,
};
use settings::{AppSettings, SetupPage};
use store::CatalogStore;
use tmdb::TmdbClient;

pub struct Cinedex {
    pub setup_page: Option<SetupPage>,
    pub active_tab: Tab,
    pub search_query: String,
    pub people_query: String,
    pub selected_genre: Option<Genre>,
    pub selected_movie: Option<MovieSummary>,
    pub selected_person: Option<Person>,
    pub detail_tab: DetailTab,
    pub trending_section: TrendingSection,
    pub image_cache: ImageCache,
    pub store: Option<CatalogStore>,
}

impl Default for Cinedex {
    fn default() -> Self {
        Self {
            setup_page: None,
            active_tab: Tab::Popular,
            search_query: String::new(),
            people_query: String::new(),
            selected_genre: None,
            selected_movie: None,
            selected_person: None,
            detail_tab: DetailTab::Info,
            trending_section: TrendingSection::Movies,
            image_cache: ImageCache::new(),
            store: None,
        }
    }
}

impl Cinedex {
    fn new() -> (Self, Task<Message>) {
        let Some(settings) = AppSettings::load() else {
            return (
                Self {
                    setup_page: Some(SetupPage::default()),
                    ..Default::default()
                },
                Task::none(),
            );
        };

        let client = TmdbClient::from_settings(&settings);
        let mut store = CatalogStore::new(client);
        let startup = Task::batch([store.load_bucket(Bucket::Popular), store.load_genres()]);

        (
            Self {
                store: Some(store),
                ..Default::default()
            },
            startup,
        )
    }

    fn initialize_with_settings(&mut self, settings: AppSettings) -> Task<Message> {
        let client = TmdbClient::from_settings(&settings);
        let mut store = CatalogStore::new(client);
        let startup = Task::batch([store.load_bucket(Bucket::Popular), store.load_genres()]);
        self.store = Some(store);
        self.setup_page = None;
        startup
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        if let Message::Setup(setup_msg) = message {
            if let Some(ref mut setup) = self.setup_page {
                if let Some(settings) = setup.update(setup_msg) {
                    return self.initialize_with_settings(settings);
                }
            }
            return Task::none();
        }
        handlers::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        if let Some(ref setup) = self.setup_page {
            return setup.view().map(Message::Setup);
        }

        let main_content = container(shell::view(self))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(BACKGROUND_DARK)),
                ..Default::default()
            });

        if let Some(ref movie) = self.selected_movie {
            let popup = detail_popup::view(self, movie);
            return iced::widget::stack![main_content, popup]
                .width(Length::Fill)
                .height(Length::Fill)
                .into();
        }

        main_content.into()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    iced::application(Cinedex::new, Cinedex::update, Cinedex::view)
        .title("Cinedex")
        .theme(Cinedex::theme)
        .window_size(Size::new(1280.0, 800.0))
        .font(iced_fonts::BOOTSTRAP_FONT_BYTES)
        .default_font(Font::DEFAULT)
        .run()
}
