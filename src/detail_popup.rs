use iced::widget::{button, column, container, row, scrollable, text, Column, Row, Space};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::cards;
use crate::catalog::{
    CastMember, DetailTab, GalleryImage, Genre, ImageOrigin, Message, MovieDetail, MovieSummary,
    RequestState, Trailer, ACCENT_AMBER, ERROR_RED, SURFACE_GRAY, TEXT_GRAY, TEXT_WHITE,
};
use crate::Cinedex;

const POPUP_WIDTH: f32 = 920.0;
const POSTER_WIDTH: f32 = 200.0;
const POSTER_HEIGHT: f32 = 300.0;
const CAST_COLUMNS: usize = 5;
const IMAGE_COLUMNS: usize = 3;

const ICON_X_LG: char = '\u{F659}';
const ICON_PLAY_FILL: char = '\u{F4F4}';

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

pub fn format_full_date(date_str: &str) -> String {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 3 || date_str.len() < 10 {
        return date_str.to_string();
    }
    format!("{}/{}/{}", parts[1], parts[2], parts[0])
}

pub fn format_rating_with_star(rating: f32) -> String {
    format!("{:.1}★", rating)
}

pub fn format_currency(amount: u64) -> String {
    if amount == 0 {
        return String::from("N/A");
    }
    let formatted = amount
        .to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",");
    format!("${}", formatted)
}

pub fn format_genres(genres: &[Genre]) -> String {
    genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_runtime(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

fn hidden_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    let transparent_rail = scrollable::Rail {
        background: None,
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
        },
    };
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: transparent_rail.clone(),
        horizontal_rail: transparent_rail,
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

fn popup_container_style(_theme: &iced::Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color::from_rgb(
            0.078, 0.078, 0.078,
        ))),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.5),
            offset: iced::Vector::new(0.0, 25.0),
            blur_radius: 50.0,
        },
        ..Default::default()
    }
}

pub fn view<'a>(app: &'a Cinedex, movie: &'a MovieSummary) -> Element<'a, Message> {
    let popup_with_close = iced::widget::stack![view_popup_content(app, movie), view_close_button()]
        .width(Length::Fixed(POPUP_WIDTH))
        .height(Length::Fill);

    let popup = container(popup_with_close)
        .max_width(POPUP_WIDTH)
        .clip(true)
        .style(popup_container_style);

    // Clicks inside the popup must not fall through to the backdrop.
    let popup_mouse_area = iced::widget::mouse_area(popup);

    let overlay_bg = iced::widget::mouse_area(
        container(Space::new().width(Length::Fill).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| container::Style {
                background: Some(iced::Background::Color(Color::from_rgba(
                    0.0, 0.0, 0.0, 0.85,
                ))),
                ..Default::default()
            }),
    )
    .on_press(Message::DetailClosed);

    let centered_popup = container(popup_mouse_area)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .padding(Padding::new(40.0));

    iced::widget::stack![overlay_bg, centered_popup]
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn view_close_button() -> Element<'static, Message> {
    let close = button(
        container(icon(ICON_X_LG).size(18).color(TEXT_WHITE))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill),
    )
    .width(Length::Fixed(36.0))
    .height(Length::Fixed(36.0))
    .padding(0)
    .style(|_theme, status| {
        let bg_alpha = match status {
            button::Status::Hovered => 0.9,
            _ => 0.6,
        };
        button::Style {
            background: Some(iced::Background::Color(Color::from_rgba(
                0.0, 0.0, 0.0, bg_alpha,
            ))),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 18.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    })
    .on_press(Message::DetailClosed);

    container(close)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding(Padding::new(16.0))
        .into()
}

fn view_popup_content<'a>(app: &'a Cinedex, movie: &'a MovieSummary) -> Element<'a, Message> {
    let title = text(movie.title.clone())
        .size(28)
        .color(TEXT_WHITE)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let tab_bar = view_detail_tab_bar(app);

    let body: Element<'a, Message> = match app.detail_tab {
        DetailTab::Info => view_info_tab(app, movie),
        DetailTab::Cast => view_cast_tab(app),
        DetailTab::Videos => view_videos_tab(app),
        DetailTab::Images => view_images_tab(app),
    };

    let content = column![title, tab_bar, body]
        .spacing(20)
        .padding(Padding::new(32.0))
        .width(Length::Fill);

    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(hidden_scrollbar_style)
        .into()
}

fn view_detail_tab_bar(app: &Cinedex) -> Element<'_, Message> {
    let tabs: Vec<Element<Message>> = DetailTab::ALL
        .into_iter()
        .map(|tab| {
            let is_active = app.detail_tab == tab;
            let label = text(tab.label())
                .size(14)
                .color(if is_active { TEXT_WHITE } else { TEXT_GRAY });

            button(label)
                .padding(Padding::new(8.0).left(16.0).right(16.0))
                .style(move |_theme, _status| button::Style {
                    background: Some(iced::Background::Color(if is_active {
                        SURFACE_GRAY
                    } else {
                        Color::TRANSPARENT
                    })),
                    text_color: if is_active { TEXT_WHITE } else { TEXT_GRAY },
                    border: Border {
                        color: if is_active {
                            ACCENT_AMBER
                        } else {
                            Color::TRANSPARENT
                        },
                        width: 1.0,
                        radius: 16.0.into(),
                    },
                    shadow: Shadow::default(),
                    snap: false,
                })
                .on_press(Message::DetailTabSelected(tab))
                .into()
        })
        .collect();

    Row::with_children(tabs).spacing(8).into()
}

fn view_info_tab<'a>(app: &'a Cinedex, movie: &'a MovieSummary) -> Element<'a, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    let poster = cards::poster_image(
        app,
        movie.poster_path.as_deref(),
        POSTER_WIDTH,
        POSTER_HEIGHT,
    );

    let mut facts = Column::new().spacing(12);
    if let Some(error) = store.detail.error() {
        facts = facts.push(view_section_error(error));
    }
    match store.detail.data() {
        Some(detail) => facts = facts.push(view_detail_facts(detail)),
        None if store.detail.is_loading() => facts = facts.push(view_section_loading()),
        // The summary carries enough to render while nothing else is there.
        None => facts = facts.push(view_summary_facts(movie)),
    }

    row![poster, facts]
        .spacing(24)
        .align_y(iced::Alignment::Start)
        .into()
}

fn view_detail_facts(detail: &MovieDetail) -> Element<'_, Message> {
    let rating = text(format!(
        "{}  ({} votes)",
        format_rating_with_star(detail.vote_average),
        detail.vote_count
    ))
    .size(15)
    .color(ACCENT_AMBER)
    .shaping(text::Shaping::Advanced);

    let mut meta_parts: Vec<String> = Vec::new();
    if let Some(date) = detail.release_date.as_deref() {
        meta_parts.push(format_full_date(date));
    }
    if let Some(runtime) = detail.runtime {
        meta_parts.push(format_runtime(runtime));
    }
    if !detail.genres.is_empty() {
        meta_parts.push(format_genres(&detail.genres));
    }
    let meta = text(meta_parts.join("  ·  "))
        .size(13)
        .color(TEXT_GRAY)
        .shaping(text::Shaping::Advanced);

    let mut facts = Column::new().push(rating).push(meta).spacing(12);

    if let Some(tagline) = &detail.tagline {
        facts = facts.push(
            text(format!("\u{201C}{}\u{201D}", tagline))
                .size(14)
                .color(TEXT_GRAY)
                .shaping(text::Shaping::Advanced),
        );
    }

    if !detail.overview.is_empty() {
        facts = facts.push(
            text(detail.overview.clone())
                .size(14)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word),
        );
    }

    let money = text(format!(
        "Budget {}   Revenue {}",
        format_currency(detail.budget),
        format_currency(detail.revenue)
    ))
    .size(13)
    .color(TEXT_GRAY);
    facts = facts.push(money);

    if !detail.production_companies.is_empty() {
        let companies = detail
            .production_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        facts = facts.push(
            text(format!("Production: {}", companies))
                .size(13)
                .color(TEXT_GRAY)
                .wrapping(text::Wrapping::Word),
        );
    }

    if let Some(homepage) = &detail.homepage {
        facts = facts.push(text(homepage.clone()).size(12).color(TEXT_GRAY));
    }

    facts.into()
}

fn view_summary_facts(movie: &MovieSummary) -> Element<'_, Message> {
    let rating = text(format_rating_with_star(movie.vote_average))
        .size(15)
        .color(ACCENT_AMBER)
        .shaping(text::Shaping::Advanced);

    let mut facts = Column::new().push(rating).spacing(12);
    if let Some(date) = movie.release_date.as_deref() {
        facts = facts.push(text(format_full_date(date)).size(13).color(TEXT_GRAY));
    }
    if !movie.overview.is_empty() {
        facts = facts.push(
            text(movie.overview.clone())
                .size(14)
                .color(TEXT_WHITE)
                .wrapping(text::Wrapping::Word),
        );
    }
    facts.into()
}

fn view_cast_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };
    view_media_section(&store.credits, "No cast information", |cast| {
        let rows: Vec<Element<Message>> = cast
            .chunks(CAST_COLUMNS)
            .map(|chunk| {
                let cards: Vec<Element<Message>> = chunk
                    .iter()
                    .map(|member| view_cast_card(app, member))
                    .collect();
                Row::with_children(cards).spacing(16).into()
            })
            .collect();
        Column::with_children(rows).spacing(20).into()
    })
}

fn view_cast_card<'a>(app: &'a Cinedex, member: &CastMember) -> Element<'a, Message> {
    let profile = cards::profile_image(app, member.profile_path.as_deref(), 120.0, 180.0);

    let name = text(member.name.clone())
        .size(13)
        .color(TEXT_WHITE)
        .wrapping(text::Wrapping::Word)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });
    let character = text(member.character.clone())
        .size(12)
        .color(TEXT_GRAY)
        .wrapping(text::Wrapping::Word);

    column![profile, name, character]
        .spacing(6)
        .width(Length::Fixed(120.0))
        .into()
}

fn view_videos_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };
    view_media_section(&store.videos, "No trailers available", |trailers| {
        let items: Vec<Element<Message>> =
            trailers.iter().map(view_trailer_row).collect();
        Column::with_children(items).spacing(12).into()
    })
}

fn view_trailer_row(trailer: &Trailer) -> Element<'_, Message> {
    let play = button(
        row![
            icon(ICON_PLAY_FILL).size(14).color(TEXT_WHITE),
            text("Watch").size(13).color(TEXT_WHITE)
        ]
        .spacing(6)
        .align_y(iced::Alignment::Center),
    )
    .padding(Padding::new(8.0).left(14.0).right(16.0))
    .style(|_theme, status| {
        let background = match status {
            button::Status::Hovered => Color::from_rgb(0.9, 0.65, 0.1),
            _ => ACCENT_AMBER,
        };
        button::Style {
            background: Some(iced::Background::Color(background)),
            text_color: crate::catalog::BACKGROUND_DARK,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 6.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        }
    })
    .on_press(Message::OpenTrailer(trailer.youtube_url()));

    let name = text(trailer.name.clone())
        .size(14)
        .color(TEXT_WHITE)
        .wrapping(text::Wrapping::Word);
    let kind = text(trailer.video_type.clone()).size(12).color(TEXT_GRAY);

    container(
        row![
            play,
            column![name, kind].spacing(2),
            Space::new().width(Length::Fill)
        ]
        .spacing(16)
        .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(SURFACE_GRAY)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn view_images_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };
    view_media_section(&store.images, "No images available", |images| {
        let rows: Vec<Element<Message>> = images
            .chunks(IMAGE_COLUMNS)
            .map(|chunk| {
                let cells: Vec<Element<Message>> = chunk
                    .iter()
                    .map(|image| view_gallery_cell(app, image))
                    .collect();
                Row::with_children(cells).spacing(12).into()
            })
            .collect();
        Column::with_children(rows).spacing(12).into()
    })
}

fn view_gallery_cell<'a>(app: &'a Cinedex, image: &GalleryImage) -> Element<'a, Message> {
    // Backdrops are landscape assets, so they get the full-size CDN path.
    let picture = match image.origin {
        ImageOrigin::Backdrop => cards::backdrop_image(app, Some(&image.file_path), 272.0, 160.0),
        ImageOrigin::Poster => cards::poster_image(app, Some(&image.file_path), 272.0, 160.0),
    };

    let caption = text(format!("{}  ·  {:.1}", image.origin.label(), image.score))
        .size(11)
        .color(TEXT_GRAY)
        .shaping(text::Shaping::Advanced);

    column![picture, caption]
        .spacing(4)
        .width(Length::Fixed(272.0))
        .into()
}

fn view_media_section<'a, T, F>(
    state: &'a RequestState<Vec<T>>,
    empty_message: &'static str,
    render: F,
) -> Element<'a, Message>
where
    F: FnOnce(&'a [T]) -> Element<'a, Message>,
{
    let mut section = Column::new().spacing(12);
    if let Some(error) = state.error() {
        section = section.push(view_section_error(error));
    }
    match state.data() {
        Some(items) if items.is_empty() => {
            section = section.push(text(empty_message).size(14).color(TEXT_GRAY));
        }
        Some(items) => section = section.push(render(items)),
        None if state.is_loading() => section = section.push(view_section_loading()),
        None => {}
    }
    section.into()
}

fn view_section_error(error: &str) -> Element<'static, Message> {
    let message = text(error.to_string()).size(13).color(TEXT_WHITE);
    let retry = button(text("Retry").size(13).color(TEXT_WHITE))
        .padding(Padding::new(6.0).left(16.0).right(16.0))
        .style(|_theme, _status| button::Style {
            background: Some(iced::Background::Color(ERROR_RED)),
            text_color: TEXT_WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 4.0.into(),
            },
            shadow: Shadow::default(),
            snap: false,
        })
        .on_press(Message::RetryPressed);

    row![message, retry]
        .spacing(16)
        .align_y(iced::Alignment::Center)
        .into()
}

fn view_section_loading() -> Element<'static, Message> {
    container(text("Loading...").size(14).color(TEXT_GRAY))
        .padding(24)
        .into()
}
