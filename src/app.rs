use crate::audio::{AudioEngine, NullAudioEngine, RodioAudioEngine};
use crate::catalog::Catalog;
use crate::controller::PlayerController;
use crate::drag::{DragTarget, fraction_along};
use crate::store::FileStore;
use crate::ui::{self, HitMap, ViewState, point_in_rect};
use anyhow::Result;
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const VOLUME_STEP: f32 = 0.05;
const SEEK_STEP_SECONDS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct AppOptions {
    pub config_dir: PathBuf,
    pub media_root: PathBuf,
    pub null_audio: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub fn run(options: AppOptions) -> Result<()> {
    let catalog = Catalog::load(&options.config_dir, &options.media_root);
    let audio: Box<dyn AudioEngine> = if options.null_audio {
        Box::new(NullAudioEngine::new())
    } else {
        match RodioAudioEngine::new() {
            Ok(engine) => Box::new(engine),
            Err(err) => {
                tracing::warn!("{err:#}; falling back to silent playback");
                Box::new(NullAudioEngine::new())
            }
        }
    };
    let store = Box::new(FileStore::new(&options.config_dir));
    let mut controller = PlayerController::new(catalog, audio, store);

    enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = event_loop(&mut terminal, &mut controller);

    controller.end_drag();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut PlayerController,
) -> Result<()> {
    let mut view = ViewState::default();
    let mut hits = HitMap::default();
    let mut last_draw = Instant::now();

    loop {
        controller.tick();

        if controller.dirty || last_draw.elapsed() > Duration::from_millis(250) {
            terminal.draw(|frame| hits = ui::draw(frame, controller, &view))?;
            controller.dirty = false;
            last_draw = Instant::now();
        }

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }

        if handle_event(controller, &mut view, event::read()?, &hits) == Flow::Quit {
            return Ok(());
        }
    }
}

fn handle_event(
    controller: &mut PlayerController,
    view: &mut ViewState,
    event: Event,
    hits: &HitMap,
) -> Flow {
    match event {
        Event::Mouse(mouse) => {
            handle_mouse(controller, view, mouse, hits);
            Flow::Continue
        }
        Event::FocusLost => {
            controller.end_drag();
            Flow::Continue
        }
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            handle_key(controller, view, key, hits.columns)
        }
        Event::Resize(_, _) => {
            controller.dirty = true;
            Flow::Continue
        }
        _ => Flow::Continue,
    }
}

fn handle_key(
    controller: &mut PlayerController,
    view: &mut ViewState,
    key: KeyEvent,
    columns: usize,
) -> Flow {
    let columns = columns.max(1);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Left => move_selection(controller, -1),
        KeyCode::Right => move_selection(controller, 1),
        KeyCode::Up => move_selection(controller, -(columns as isize)),
        KeyCode::Down => move_selection(controller, columns as isize),
        KeyCode::Enter => controller.select_card(controller.selected_card),
        KeyCode::Char(' ') => controller.toggle_play_pause(),
        KeyCode::Char('p') | KeyCode::Char(',') => {
            controller.play_previous();
        }
        KeyCode::Char('n') | KeyCode::Char('.') => {
            controller.play_next();
        }
        KeyCode::Char('[') => {
            controller.seek_by(-SEEK_STEP_SECONDS);
        }
        KeyCode::Char(']') => {
            controller.seek_by(SEEK_STEP_SECONDS);
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            controller.set_volume(controller.volume_level() + VOLUME_STEP);
        }
        KeyCode::Char('-') => {
            controller.set_volume(controller.volume_level() - VOLUME_STEP);
        }
        KeyCode::Char('m') => controller.toggle_mute(),
        KeyCode::Char('h') => {
            view.sidebar_open = !view.sidebar_open;
            controller.dirty = true;
        }
        _ => {}
    }
    Flow::Continue
}

fn move_selection(controller: &mut PlayerController, delta: isize) {
    let count = controller.catalog().cards.len();
    if count == 0 {
        return;
    }
    let next = controller
        .selected_card
        .saturating_add_signed(delta)
        .min(count - 1);
    if next != controller.selected_card {
        controller.selected_card = next;
        controller.dirty = true;
    }
}

fn handle_mouse(
    controller: &mut PlayerController,
    view: &mut ViewState,
    mouse: MouseEvent,
    hits: &HitMap,
) {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(x, y, hits.progress) {
                controller.begin_drag(DragTarget::Progress, fraction_along(x, hits.progress));
            } else if point_in_rect(x, y, hits.volume) {
                controller.begin_drag(DragTarget::Volume, fraction_along(x, hits.volume));
            } else if point_in_rect(x, y, hits.volume_icon) {
                controller.toggle_mute();
            } else if point_in_rect(x, y, hits.previous) {
                controller.play_previous();
            } else if point_in_rect(x, y, hits.play_pause) {
                controller.toggle_play_pause();
            } else if point_in_rect(x, y, hits.next) {
                controller.play_next();
            } else if point_in_rect(x, y, hits.hamburger) {
                view.sidebar_open = !view.sidebar_open;
                controller.dirty = true;
            } else if let Some(idx) = hits.card_at(x, y) {
                controller.select_card(idx);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if let Some(target) = controller.drag().map(|gesture| gesture.target()) {
                controller.update_drag(fraction_along(x, hits.slider(target)));
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(target) = controller.drag().map(|gesture| gesture.target()) {
                controller.update_drag(fraction_along(x, hits.slider(target)));
            }
            controller.end_drag();
        }
        MouseEventKind::ScrollDown if point_in_rect(x, y, hits.deck) => {
            move_selection(controller, hits.columns.max(1) as isize);
        }
        MouseEventKind::ScrollUp if point_in_rect(x, y, hits.deck) => {
            move_selection(controller, -(hits.columns.max(1) as isize));
        }
        _ => {}
    }
}
