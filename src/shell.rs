use iced::widget::{
    button, column, container, row, scrollable, text, text_input, Column, Row, Space,
};
use iced::{Border, Color, Element, Length, Padding, Shadow};

use crate::cards;
use crate::catalog::{
    ListSource, Message, MovieSummary, RequestState, Tab, ACCENT_AMBER, ERROR_RED, SURFACE_GRAY,
    TEXT_GRAY, TEXT_WHITE,
};
use crate::Cinedex;

const ICON_SEARCH: char = '\u{F52A}';
const ICON_X: char = '\u{F659}';

fn icon(icon_char: char) -> iced::widget::Text<'static> {
    text(icon_char.to_string()).font(iced::Font {
        family: iced::font::Family::Name("bootstrap-icons"),
        ..Default::default()
    })
}

fn hidden_vertical_scrollbar_style(
    _theme: &iced::Theme,
    _status: scrollable::Status,
) -> scrollable::Style {
    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        horizontal_rail: scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: iced::Background::Color(Color::TRANSPARENT),
                border: Border::default(),
            },
        },
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            shadow: Shadow::default(),
            icon: Color::TRANSPARENT,
        },
    }
}

pub fn view(app: &Cinedex) -> Element<'_, Message> {
    let body = column![view_header(app), view_tab_bar(app), view_tab_content(app)]
        .spacing(24)
        .width(Length::Fill);

    scrollable(container(body).padding(Padding::new(24.0).left(48.0).right(48.0)))
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new().width(0).scroller_width(0),
        ))
        .width(Length::Fill)
        .height(Length::Fill)
        .style(hidden_vertical_scrollbar_style)
        .into()
}

fn view_header(app: &Cinedex) -> Element<'_, Message> {
    let logo = text("Cinedex")
        .size(28)
        .color(ACCENT_AMBER)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        });

    let search_bar = view_search_bar(app);

    row![logo, Space::new().width(Length::Fill), search_bar]
        .align_y(iced::Alignment::Center)
        .into()
}

fn view_search_bar(app: &Cinedex) -> Element<'_, Message> {
    let search_icon = icon(ICON_SEARCH).size(14).color(TEXT_GRAY);

    let search_input = text_input("Search movies...", &app.search_query)
        .on_input(Message::SearchInputChanged)
        .on_submit(Message::SearchSubmitted)
        .padding(8)
        .width(Length::Fixed(220.0))
        .style(|_theme, _status| text_input::Style {
            background: iced::Background::Color(Color::TRANSPARENT),
            border: Border::default(),
            icon: TEXT_GRAY,
            placeholder: TEXT_GRAY,
            value: TEXT_WHITE,
            selection: ACCENT_AMBER,
        });

    let mut search_content = row![search_icon, search_input]
        .spacing(8)
        .align_y(iced::Alignment::Center);

    if !app.search_query.is_empty() {
        let clear_button = button(icon(ICON_X).size(14).color(TEXT_GRAY))
            .padding(4)
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color: TEXT_GRAY,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::SearchCleared);
        search_content = search_content.push(clear_button);
    }

    container(search_content)
        .padding(Padding::new(4.0).left(12.0).right(8.0))
        .style(|_theme| container::Style {
            background: Some(iced::Background::Color(SURFACE_GRAY)),
            border: Border {
                color: TEXT_GRAY,
                width: 1.0,
                radius: 24.0.into(),
            },
            ..Default::default()
        })
        .into()
}

fn view_tab_bar(app: &Cinedex) -> Element<'_, Message> {
    let tabs: Vec<Element<Message>> = Tab::ALL
        .into_iter()
        .map(|tab| view_tab_button(tab, app.active_tab == tab))
        .collect();

    Row::with_children(tabs)
        .spacing(8)
        .align_y(iced::Alignment::Center)
        .into()
}

fn view_tab_button<'a>(tab: Tab, is_active: bool) -> Element<'a, Message> {
    let label_text = text(tab.label())
        .size(14)
        .color(if is_active { TEXT_WHITE } else { TEXT_GRAY });

    let button_content: Element<'a, Message> = if is_active {
        let underline = container(Space::new().width(Length::Fill).height(2)).style(|_theme| {
            container::Style {
                background: Some(iced::Background::Color(ACCENT_AMBER)),
                ..Default::default()
            }
        });
        column![label_text, underline]
            .spacing(4)
            .align_x(iced::Alignment::Center)
            .into()
    } else {
        label_text.into()
    };

    button(button_content)
        .padding(Padding::new(8.0).left(12.0).right(12.0))
        .style(move |_theme, status| {
            let text_color = match status {
                button::Status::Hovered => TEXT_WHITE,
                _ if is_active => TEXT_WHITE,
                _ => TEXT_GRAY,
            };
            button::Style {
                background: Some(iced::Background::Color(Color::TRANSPARENT)),
                text_color,
                border: Border::default(),
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::TabSelected(tab))
        .into()
}

fn view_tab_content(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    if let Some(bucket) = app.active_tab.bucket() {
        return view_movie_list(app, store.bucket(bucket), String::from(bucket.title()));
    }

    match app.active_tab {
        Tab::Search => view_search_tab(app),
        Tab::Trending => view_trending_tab(app),
        Tab::Genres => view_genres_tab(app),
        Tab::People => view_people_tab(app),
        // Bucket tabs are handled above.
        _ => Space::new().into(),
    }
}

fn view_search_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    let mut content = Column::new().spacing(16);
    if let ListSource::PersonCredits(_) = store.source {
        let back = button(text("Back to people").size(14).color(TEXT_WHITE))
            .padding(Padding::new(8.0).left(16.0).right(16.0))
            .style(|_theme, _status| button::Style {
                background: Some(iced::Background::Color(SURFACE_GRAY)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 16.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            })
            .on_press(Message::FilmographyCleared);
        content = content.push(back);
    }

    // A fresh search tab with nothing issued yet shows the popular bucket.
    let list = if store.results.is_idle() {
        match store.source {
            ListSource::Bucket(bucket) => {
                view_movie_list(app, store.bucket(bucket), store.source.heading())
            }
            _ => view_movie_list(app, &store.results, store.source.heading()),
        }
    } else {
        view_movie_list(app, &store.results, store.source.heading())
    };

    content.push(list).into()
}

fn view_trending_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    let mut content = Column::new()
        .spacing(16)
        .push(view_heading("Trending Today"));

    if let Some(error) = store.trending.error() {
        content = content.push(view_error_banner(error));
    }
    match store.trending.data() {
        Some(feed) => content = content.push(cards::trending_view(app, feed)),
        None if store.trending.is_loading() => content = content.push(view_skeleton_grid()),
        None => {}
    }
    content.into()
}

fn view_genres_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    let mut content = Column::new().spacing(24).push(view_heading("Browse by Genre"));

    if store.genres.is_degraded() {
        content = content.push(view_degraded_notice());
    } else {
        content = content.push(cards::genre_grid(
            store.genres.genres(),
            app.selected_genre.as_ref(),
        ));
    }

    if app.selected_genre.is_some() {
        content = content.push(view_movie_list(app, &store.results, store.source.heading()));
    }
    content.into()
}

fn view_people_tab(app: &Cinedex) -> Element<'_, Message> {
    let Some(store) = &app.store else {
        return Space::new().into();
    };

    let people_input = text_input("Search people...", &app.people_query)
        .on_input(Message::PeopleQueryChanged)
        .on_submit(Message::PeopleSearchSubmitted)
        .padding(8)
        .width(Length::Fixed(260.0));

    let mut content = Column::new()
        .spacing(16)
        .push(view_heading("People"))
        .push(people_input);

    if let Some(error) = store.people.error() {
        content = content.push(view_error_banner(error));
    }
    match store.people.data() {
        Some(people) if people.is_empty() => content = content.push(view_empty_state()),
        Some(people) => {
            content = content.push(cards::people_grid(app, people));
            if store.next_people_page().is_some() {
                content = content.push(view_load_more_button());
            } else if store.people.is_loading() {
                content = content.push(view_skeleton_grid());
            }
        }
        None if store.people.is_loading() => content = content.push(view_skeleton_grid()),
        None => {}
    }
    content.into()
}

fn view_movie_list<'a>(
    app: &'a Cinedex,
    state: &'a RequestState<Vec<MovieSummary>>,
    heading: String,
) -> Element<'a, Message> {
    let mut content = Column::new().spacing(16).push(view_heading(&heading));

    if let Some(error) = state.error() {
        content = content.push(view_error_banner(error));
    }
    match state.data() {
        Some(movies) if movies.is_empty() => content = content.push(view_empty_state()),
        Some(movies) => content = content.push(cards::movie_grid(app, movies)),
        None if state.is_loading() => content = content.push(view_skeleton_grid()),
        None => {}
    }
    content.into()
}

fn view_heading(heading: &str) -> Element<'static, Message> {
    text(heading.to_string())
        .size(24)
        .color(TEXT_WHITE)
        .font(iced::Font {
            weight: iced::font::Weight::Bold,
            ..Default::default()
        })
        .into()
}

fn view_error_banner(error: &str) -> Element<'static, Message> {
    let message = text(error.to_string()).size(14).color(TEXT_WHITE);
    let retry = button(text("Retry").size(14).color(TEXT_WHITE))
        .padding(Padding::new(8.0).left(20.0).right(20.0))
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

    container(
        row![message, Space::new().width(Length::Fill), retry]
            .spacing(16)
            .align_y(iced::Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(|_theme| container::Style {
        background: Some(iced::Background::Color(Color::from_rgba(
            0.937, 0.267, 0.267, 0.15,
        ))),
        border: Border {
            color: ERROR_RED,
            width: 1.0,
            radius: 8.0.into(),
        },
        ..Default::default()
    })
    .into()
}

fn view_degraded_notice() -> Element<'static, Message> {
    container(
        text("Genres are unavailable right now; browsing by genre is disabled.")
            .size(13)
            .color(TEXT_GRAY),
    )
    .padding(12)
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

fn view_empty_state() -> Element<'static, Message> {
    container(text("No results found").size(16).color(TEXT_GRAY))
        .width(Length::Fill)
        .padding(48)
        .center_x(Length::Fill)
        .into()
}

fn view_load_more_button() -> Element<'static, Message> {
    button(text("Load more").size(14).color(TEXT_WHITE))
        .padding(Padding::new(10.0).left(24.0).right(24.0))
        .style(|_theme, status| {
            let background = match status {
                button::Status::Hovered => Color::from_rgba(1.0, 1.0, 1.0, 0.15),
                _ => SURFACE_GRAY,
            };
            button::Style {
                background: Some(iced::Background::Color(background)),
                text_color: TEXT_WHITE,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: 20.0.into(),
                },
                shadow: Shadow::default(),
                snap: false,
            }
        })
        .on_press(Message::LoadMorePeople)
        .into()
}

fn view_skeleton_grid() -> Element<'static, Message> {
    let cards: Vec<Element<'static, Message>> = (0..6)
        .map(|_| {
            container(Space::new().width(cards::CARD_WIDTH).height(cards::POSTER_HEIGHT))
                .style(|_theme| container::Style {
                    background: Some(iced::Background::Color(Color::from_rgba(
                        0.2, 0.2, 0.2, 0.5,
                    ))),
                    border: Border {
                        color: Color::TRANSPARENT,
                        width: 0.0,
                        radius: 8.0.into(),
                    },
                    ..Default::default()
                })
                .into()
        })
        .collect();

    Row::with_children(cards).spacing(16).into()
}
