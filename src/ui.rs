use crate::controller::PlayerController;
use crate::drag::DragTarget;
use crate::model::PlaybackState;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use std::time::Duration;

const APP_TITLE: &str = "songdeck";
const HAMBURGER: &str = " ≡ ";
const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 5;
const BUTTON_WIDTH: u16 = 6;
const CLOCK_WIDTH: u16 = 6;

#[derive(Debug, Clone, Copy, Default)]
pub struct ViewState {
    pub sidebar_open: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    pub hamburger: Rect,
    pub deck: Rect,
    pub cards: Vec<(usize, Rect)>,
    pub columns: usize,
    pub previous: Rect,
    pub play_pause: Rect,
    pub next: Rect,
    pub progress: Rect,
    pub volume_icon: Rect,
    pub volume: Rect,
}

impl HitMap {
    pub fn card_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cards
            .iter()
            .find(|(_, rect)| point_in_rect(x, y, *rect))
            .map(|(idx, _)| *idx)
    }

    pub fn slider(&self, target: DragTarget) -> Rect {
        match target {
            DragTarget::Progress => self.progress,
            DragTarget::Volume => self.volume,
        }
    }
}

#[derive(Clone, Copy)]
struct Palette {
    bg: Color,
    panel_bg: Color,
    border: Color,
    text: Color,
    muted: Color,
    disabled: Color,
    accent: Color,
    slider_track: Color,
    slider_fill: Color,
    selected_bg: Color,
}

fn palette() -> Palette {
    Palette {
        bg: Color::Rgb(18, 18, 18),
        panel_bg: Color::Rgb(24, 24, 24),
        border: Color::Rgb(64, 64, 64),
        text: Color::Rgb(240, 240, 240),
        muted: Color::Rgb(179, 179, 179),
        disabled: Color::Rgb(90, 90, 90),
        accent: Color::Rgb(29, 185, 84),
        slider_track: Color::Rgb(77, 77, 77),
        slider_fill: Color::Rgb(220, 220, 220),
        selected_bg: Color::Rgb(40, 40, 40),
    }
}

pub fn draw(frame: &mut Frame, controller: &PlayerController, view: &ViewState) -> HitMap {
    let colors = palette();
    let mut hits = HitMap::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(colors.bg)),
        frame.area(),
    );

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_header(frame, vertical[0], &colors, &mut hits);

    let deck_area = if view.sidebar_open {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
            .split(vertical[1]);
        draw_history(frame, body[0], controller, &colors);
        body[1]
    } else {
        vertical[1]
    };
    draw_deck(frame, deck_area, controller, &colors, &mut hits);
    draw_now_playing(frame, vertical[2], controller, &colors, &mut hits);

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            "Enter play card  Space play/pause  p/n prev/next  [/] seek  +/- volume  m mute  h history  q quit",
            Style::default().fg(colors.muted),
        ),
        Span::styled("  |  ", Style::default().fg(colors.muted)),
        Span::styled(controller.status.as_str(), Style::default().fg(colors.text)),
    ]));
    frame.render_widget(footer, vertical[3]);

    hits
}

fn draw_header(frame: &mut Frame, area: Rect, colors: &Palette, hits: &mut HitMap) {
    hits.hamburger = Rect {
        width: (HAMBURGER.chars().count() as u16).min(area.width),
        ..area
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            HAMBURGER,
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            APP_TITLE,
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    frame.render_widget(header, area);
}

fn draw_history(frame: &mut Frame, area: Rect, controller: &PlayerController, colors: &Palette) {
    let history = controller.history();
    let items: Vec<ListItem> = history
        .entries()
        .iter()
        .enumerate()
        .map(|(idx, track)| {
            let marker = if history.cursor() == Some(idx) { "> " } else { "  " };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(colors.accent)),
                Span::styled(track.title.as_str(), Style::default().fg(colors.text)),
                Span::styled(
                    format!("  {}", track.artist),
                    Style::default().fg(colors.muted),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(history.cursor());
    let list = List::new(items)
        .block(panel_block("History", colors.panel_bg, colors.text, colors.border))
        .highlight_style(Style::default().bg(colors.selected_bg));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_deck(
    frame: &mut Frame,
    area: Rect,
    controller: &PlayerController,
    colors: &Palette,
    hits: &mut HitMap,
) {
    hits.deck = area;
    let cards = &controller.catalog().cards;
    let columns = usize::from((area.width / CARD_WIDTH).max(1));
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    hits.columns = columns;

    let selected_row = controller.selected_card / columns;
    let first_row = selected_row.saturating_sub(visible_rows.saturating_sub(1));
    let playing_title = controller.current().map(|track| track.title.as_str());

    for (idx, card) in cards.iter().enumerate().skip(first_row * columns) {
        let row = idx / columns - first_row;
        if row >= visible_rows {
            break;
        }
        let col = idx % columns;
        let rect = Rect {
            x: area.x + col as u16 * CARD_WIDTH,
            y: area.y + row as u16 * CARD_HEIGHT,
            width: CARD_WIDTH.min(area.width),
            height: CARD_HEIGHT.min(area.height),
        }
        .intersection(area);
        if rect.is_empty() {
            continue;
        }

        let is_selected = idx == controller.selected_card;
        let is_playing = playing_title == Some(card.title.as_str());
        let border = if is_selected { colors.accent } else { colors.border };
        let bg = if is_selected {
            colors.selected_bg
        } else {
            colors.panel_bg
        };
        let title_style = if is_playing {
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors.text).add_modifier(Modifier::BOLD)
        };

        let body = Paragraph::new(vec![
            Line::from(Span::styled(card.title.as_str(), title_style)),
            Line::from(Span::styled(
                card.artist.as_str(),
                Style::default().fg(colors.muted),
            )),
            Line::from(Span::styled(
                card.cover_src.as_str(),
                Style::default().fg(colors.disabled),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(bg)),
        );
        frame.render_widget(body, rect);
        hits.cards.push((idx, rect));
    }
}

fn draw_now_playing(
    frame: &mut Frame,
    area: Rect,
    controller: &PlayerController,
    colors: &Palette,
    hits: &mut HitMap,
) {
    let block = panel_block("Now Playing", colors.panel_bg, colors.text, colors.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
        ])
        .split(inner);

    let (title, artist, cover) = match controller.current() {
        Some(track) => (
            track.title.as_str(),
            track.artist.as_str(),
            track.cover_src.as_str(),
        ),
        None => ("-", "-", ""),
    };
    let info = Paragraph::new(vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(artist, Style::default().fg(colors.muted))),
        Line::from(Span::styled(cover, Style::default().fg(colors.disabled))),
    ]);
    frame.render_widget(info, columns[0]);

    draw_transport(frame, columns[1], controller, colors, hits);
    draw_volume(frame, columns[2], controller, colors, hits);
}

fn draw_transport(
    frame: &mut Frame,
    area: Rect,
    controller: &PlayerController,
    colors: &Palette,
    hits: &mut HitMap,
) {
    if area.height < 2 {
        return;
    }

    let buttons_width = BUTTON_WIDTH * 3;
    let start = area.x + area.width.saturating_sub(buttons_width) / 2;
    let row = area.y;
    hits.previous = Rect::new(start, row, BUTTON_WIDTH, 1).intersection(area);
    hits.play_pause = Rect::new(start + BUTTON_WIDTH, row, BUTTON_WIDTH, 1).intersection(area);
    hits.next = Rect::new(start + BUTTON_WIDTH * 2, row, BUTTON_WIDTH, 1).intersection(area);

    let enabled = |on: bool| {
        if on {
            Style::default().fg(colors.text)
        } else {
            Style::default().fg(colors.disabled)
        }
    };
    let play_label = match controller.state() {
        PlaybackState::Playing => " ❚❚  ",
        PlaybackState::Paused | PlaybackState::Stopped => "  ▶  ",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(" |◀   ", enabled(controller.has_previous()))),
        hits.previous,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            play_label,
            Style::default()
                .fg(colors.bg)
                .bg(colors.text)
                .add_modifier(Modifier::BOLD),
        )),
        hits.play_pause,
    );
    frame.render_widget(
        Paragraph::new(Span::styled("   ▶| ", enabled(controller.has_next()))),
        hits.next,
    );

    let slider_row = row + 1;
    let slider_width = area.width.saturating_sub(CLOCK_WIDTH * 2);
    let elapsed_rect = Rect::new(area.x, slider_row, CLOCK_WIDTH, 1).intersection(area);
    hits.progress = Rect::new(area.x + CLOCK_WIDTH, slider_row, slider_width, 1).intersection(area);
    let total_rect =
        Rect::new(area.x + CLOCK_WIDTH + slider_width, slider_row, CLOCK_WIDTH, 1).intersection(area);

    let dragging = controller
        .drag()
        .is_some_and(|gesture| gesture.target() == DragTarget::Progress);
    frame.render_widget(
        Paragraph::new(Span::styled(
            format_clock(controller.elapsed()),
            Style::default().fg(colors.muted),
        ))
        .alignment(Alignment::Right),
        elapsed_rect,
    );
    frame.render_widget(
        slider_line(controller.progress(), hits.progress.width, dragging, colors),
        hits.progress,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            controller
                .total()
                .map(format_clock)
                .unwrap_or_else(|| String::from("-:--")),
            Style::default().fg(colors.muted),
        )),
        total_rect,
    );
}

fn draw_volume(
    frame: &mut Frame,
    area: Rect,
    controller: &PlayerController,
    colors: &Palette,
    hits: &mut HitMap,
) {
    if area.height < 2 || area.width < 6 {
        return;
    }

    let row = area.y + 1;
    let tier = controller.volume_tier();
    hits.volume_icon = Rect::new(area.x + 1, row, 2, 1);
    hits.volume = Rect::new(area.x + 4, row, area.width.saturating_sub(5), 1).intersection(area);

    frame.render_widget(
        Paragraph::new(Span::styled(tier.glyph(), Style::default().fg(colors.text))),
        hits.volume_icon,
    );
    let dragging = controller
        .drag()
        .is_some_and(|gesture| gesture.target() == DragTarget::Volume);
    frame.render_widget(
        slider_line(
            f64::from(controller.volume_level()),
            hits.volume.width,
            dragging,
            colors,
        ),
        hits.volume,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(
                "{} {:>3}%",
                tier.label(),
                (controller.volume_level() * 100.0).round() as u16
            ),
            Style::default().fg(colors.muted),
        ))
        .alignment(Alignment::Right),
        Rect::new(area.x, area.y, area.width, 1),
    );
}

fn slider_line(fraction: f64, width: u16, dragging: bool, colors: &Palette) -> Paragraph<'static> {
    let (filled, handle, rest) = slider_parts(fraction, usize::from(width));
    let fill_color = if dragging {
        colors.accent
    } else {
        colors.slider_fill
    };
    Paragraph::new(Line::from(vec![
        Span::styled("━".repeat(filled), Style::default().fg(fill_color)),
        Span::styled(
            "●".repeat(handle),
            Style::default()
                .fg(colors.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("─".repeat(rest), Style::default().fg(colors.slider_track)),
    ]))
}

fn slider_parts(fraction: f64, width: usize) -> (usize, usize, usize) {
    if width == 0 {
        return (0, 0, 0);
    }
    let clamped = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let handle_at = (clamped * (width - 1) as f64).round() as usize;
    (handle_at, 1, width - handle_at - 1)
}

fn panel_block(title: &str, bg: Color, text: Color, border: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(text).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(bg))
}

pub fn format_clock(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes}:{seconds:02}")
}

pub fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    if rect.width == 0 || rect.height == 0 {
        return false;
    }
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudioEngine;
    use crate::catalog::Catalog;
    use crate::store::MemoryStore;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::Path;

    fn controller() -> PlayerController {
        PlayerController::new(
            Catalog::builtin(Path::new(".")),
            Box::new(NullAudioEngine::new()),
            Box::new(MemoryStore::new()),
        )
    }

    #[test]
    fn clock_uses_minutes_and_padded_seconds() {
        assert_eq!(format_clock(Duration::from_secs(0)), "0:00");
        assert_eq!(format_clock(Duration::from_secs(65)), "1:05");
        assert_eq!(format_clock(Duration::from_secs(754)), "12:34");
    }

    #[test]
    fn slider_handle_tracks_fraction() {
        assert_eq!(slider_parts(0.0, 11), (0, 1, 10));
        assert_eq!(slider_parts(0.5, 11), (5, 1, 5));
        assert_eq!(slider_parts(1.0, 11), (10, 1, 0));
        assert_eq!(slider_parts(4.0, 11), (10, 1, 0));
        assert_eq!(slider_parts(0.3, 0), (0, 0, 0));
    }

    #[test]
    fn draw_records_hit_regions() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let controller = controller();
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| hits = draw(frame, &controller, &ViewState::default()))
            .expect("draw");

        assert_eq!(hits.columns, 4);
        assert!(!hits.cards.is_empty());
        assert_eq!(hits.cards[0].0, 0);
        assert!(hits.progress.width > 0);
        assert!(hits.volume.width > 0);
        assert_eq!(hits.play_pause.x, hits.previous.x + BUTTON_WIDTH);
        assert_eq!(hits.card_at(hits.cards[1].1.x + 1, hits.cards[1].1.y + 1), Some(1));
    }

    #[test]
    fn deck_scrolls_to_keep_selection_visible() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let mut controller = controller();
        controller.selected_card = 14;
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| hits = draw(frame, &controller, &ViewState::default()))
            .expect("draw");

        assert!(hits.cards.iter().any(|(idx, _)| *idx == 14));
    }

    #[test]
    fn sidebar_narrows_the_deck() {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).expect("terminal");
        let controller = controller();
        let mut hits = HitMap::default();
        terminal
            .draw(|frame| {
                hits = draw(frame, &controller, &ViewState { sidebar_open: true });
            })
            .expect("draw");

        assert!(hits.deck.x > 0);
        assert!(hits.columns < 4);
    }
}
