use iced::widget::{container, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Shadow};

use crate::catalog::{
    Genre, Message, MovieSummary, Person, TrendingEntry, TrendingFeed, TrendingSection,
    ACCENT_AMBER, SURFACE_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::tmdb::ImageSize;
use crate::Cinedex;

const ICON_FILM: char = '\u{F3A9}';
const ICON_PERSON_FILL: char = '\u{F4DA}';

pub const CARD_WIDTH: f32 = 150.0;
pub const POSTER_HEIGHT: f32 = 225.0;
const GRID_COLUMNS: usize = 6;

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn movie_grid<'a>(app: &'a Cinedex, movies: &[MovieSummary]) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = movies
        .chunks(GRID_COLUMNS)
        .map(|chunk| {
            let cards: Vec<Element<'a, Message>> =
                chunk.iter().map(|movie| movie_card(app, movie)).collect();
            Row::with_children(cards)
                .spacing(16)
                .align_y(iced::Alignment::Start)
                .into()
        })
        .collect();

    Column::with_children(rows).spacing(24).into()
}

pub fn movie_card<'a>(app: &'a Cinedex, movie: &MovieSummary) -> Element<'a, Message> {
    let poster = poster_image(app, movie.poster_path.as_deref(), CARD_WIDTH, POSTER_HEIGHT);

    let title = text(movie.title.clone())
        .size(13)
        .color(TEXT_WHITE)
        .wrapping(text::Wrapping::Word)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let rating = text(format!("★ {:.1}", movie.vote_average))
        .size(12)
        .color(ACCENT_AMBER)
        .shaping(text::Shaping::Advanced);
    let year = text(movie.release_year().unwrap_or("—").to_string())
        .size(12)
        .color(TEXT_GRAY)
        .shaping(text::Shaping::Advanced);
    let meta = Row::new()
        .push(rating)
        .push(Space::new().width(Length::Fill))
        .push(year)
        .width(Length::Fixed(CARD_WIDTH));

    let card = Column::new()
        .push(poster)
        .push(title)
        .push(meta)
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH));

    let card_container = container(card).style(|_theme| container::Style {
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 8.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 8.0,
        },
        ..Default::default()
    });

    iced::widget::mouse_area(card_container)
        .on_press(Message::MovieSelected(movie.clone()))
        .into()
}

pub fn people_grid<'a>(app: &'a Cinedex, people: &[Person]) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = people
        .chunks(GRID_COLUMNS)
        .map(|chunk| {
            let cards: Vec<Element<'a, Message>> =
                chunk.iter().map(|person| person_card(app, person)).collect();
            Row::with_children(cards)
                .spacing(16)
                .align_y(iced::Alignment::Start)
                .into()
        })
        .collect();

    Column::with_children(rows).spacing(24).into()
}

pub fn person_card<'a>(app: &'a Cinedex, person: &Person) -> Element<'a, Message> {
    let profile = profile_image(app, person.profile_path.as_deref(), CARD_WIDTH, POSTER_HEIGHT);

    let name = text(person.name.clone())
        .size(13)
        .color(TEXT_WHITE)
        .wrapping(text::Wrapping::Word)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let popularity = text(format!("Popularity {:.1}", person.popularity))
        .size(11)
        .color(TEXT_GRAY);

    let mut card = Column::new()
        .push(profile)
        .push(name)
        .push(popularity)
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH));

    if !person.known_for.is_empty() {
        card = card.push(
            text(person.known_for.join(", "))
                .size(11)
                .color(TEXT_GRAY)
                .wrapping(text::Wrapping::Word),
        );
    }

    iced::widget::mouse_area(container(card))
        .on_press(Message::PersonSelected(person.clone()))
        .into()
}

pub fn genre_grid<'a>(genres: &[Genre], selected: Option<&Genre>) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = genres
        .chunks(5)
        .map(|chunk| {
            let buttons: Vec<Element<'a, Message>> = chunk
                .iter()
                .map(|genre| genre_button(genre, selected == Some(genre)))
                .collect();
            Row::with_children(buttons).spacing(12).into()
        })
        .collect();

    Column::with_children(rows).spacing(12).into()
}

fn genre_button<'a>(genre: &Genre, is_selected: bool) -> Element<'a, Message> {
    let label = text(genre.name.clone()).size(14).color(if is_selected {
        crate::catalog::BACKGROUND_DARK
    } else {
        TEXT_WHITE
    });

    iced::widget::button(label)
        .padding(iced::Padding::new(10.0).left(20.0).right(20.0))
        .style(move |_theme, status| {
            let background = match (is_selected, status) {
                (true, _) => ACCENT_AMBER,
                (false, iced::widget::button::Status::Hovered) => {
                    Color::from_rgba(1.0, 1.0, 1.0, 0.15)
                }
                (false, _) => SURFACE_GRAY,
            };
            iced::widget::button::Style {
                background: Some(iced::Background::Color(background)),
                text_color: if is_selected {
                    crate::catalog::BACKGROUND_DARK
                } else {
                    TEXT_WHITE
                },
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 20.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::GenreSelected(genre.clone()))
        .into()
}

pub fn trending_view<'a>(app: &'a Cinedex, feed: &TrendingFeed) -> Element<'a, Message> {
    let switcher: Vec<Element<'a, Message>> = TrendingSection::ALL
        .into_iter()
        .map(|section| section_button(section, app.trending_section == section))
        .collect();
    let switcher_row = Row::with_children(switcher).spacing(12);

    let body = match app.trending_section {
        TrendingSection::Movies => movie_grid(app, &feed.movies),
        TrendingSection::People => people_grid(app, &feed.people),
        TrendingSection::All => mixed_grid(app, &feed.all),
    };

    Column::new().push(switcher_row).push(body).spacing(24).into()
}

fn section_button<'a>(section: TrendingSection, is_active: bool) -> Element<'a, Message> {
    let label = text(section.label()).size(14).color(if is_active {
        crate::catalog::BACKGROUND_DARK
    } else {
        TEXT_WHITE
    });

    iced::widget::button(label)
        .padding(iced::Padding::new(8.0).left(18.0).right(18.0))
        .style(move |_theme, status| {
            let background = match (is_active, status) {
                (true, _) => ACCENT_AMBER,
                (false, iced::widget::button::Status::Hovered) => {
                    Color::from_rgba(1.0, 1.0, 1.0, 0.15)
                }
                (false, _) => SURFACE_GRAY,
            };
            iced::widget::button::Style {
                background: Some(iced::Background::Color(background)),
                text_color: if is_active {
                    crate::catalog::BACKGROUND_DARK
                } else {
                    TEXT_WHITE
                },
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 16.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::TrendingSectionSelected(section))
        .into()
}

fn mixed_grid<'a>(app: &'a Cinedex, entries: &[TrendingEntry]) -> Element<'a, Message> {
    let rows: Vec<Element<'a, Message>> = entries
        .chunks(GRID_COLUMNS)
        .map(|chunk| {
            let cards: Vec<Element<'a, Message>> =
                chunk.iter().map(|entry| mixed_card(app, entry)).collect();
            Row::with_children(cards)
                .spacing(16)
                .align_y(iced::Alignment::Start)
                .into()
        })
        .collect();

    Column::with_children(rows).spacing(24).into()
}

fn mixed_card<'a>(app: &'a Cinedex, entry: &TrendingEntry) -> Element<'a, Message> {
    let image = poster_image(app, entry.image_path.as_deref(), CARD_WIDTH, POSTER_HEIGHT);

    let title = text(entry.title.clone())
        .size(13)
        .color(TEXT_WHITE)
        .wrapping(text::Wrapping::Word)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let kind = text(entry.kind.label()).size(11).color(TEXT_GRAY);

    let card = Column::new()
        .push(image)
        .push(title)
        .push(kind)
        .spacing(6)
        .width(Length::Fixed(CARD_WIDTH));

    // Only movie entries open the detail modal.
    match entry.to_movie() {
        Some(movie) => iced::widget::mouse_area(container(card))
            .on_press(Message::MovieSelected(movie))
            .into(),
        None => container(card).into(),
    }
}

pub fn poster_image<'a>(
    app: &'a Cinedex,
    path: Option<&str>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    cached_image(app, path, width, height, ICON_FILM, ImageSize::Poster)
}

pub fn backdrop_image<'a>(
    app: &'a Cinedex,
    path: Option<&str>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    cached_image(app, path, width, height, ICON_FILM, ImageSize::Backdrop)
}

pub fn profile_image<'a>(
    app: &'a Cinedex,
    path: Option<&str>,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    cached_image(app, path, width, height, ICON_PERSON_FILL, ImageSize::Poster)
}

fn cached_image<'a>(
    app: &'a Cinedex,
    path: Option<&str>,
    width: f32,
    height: f32,
    placeholder: char,
    size: ImageSize,
) -> Element<'a, Message> {
    let handle = path.and_then(|path| {
        let store = app.store.as_ref()?;
        let url = store.client().image_url(path, size);
        app.image_cache.get(&url)
    });

    match handle {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => container(icon(placeholder).size(48).color(TEXT_GRAY))
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(SURFACE_GRAY)),
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 8.0.into(),
                },
                ..Default::default()
            })
            .into(),
    }
}
