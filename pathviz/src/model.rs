//! Elm-architecture model for the visualizer.

use std::time::Duration;

use log::info;
use pathviz_core::{
    Cell, Grid, Point, Range, Style,
    app::{self, Effect},
    messages::{Key, ModMask, Msg, MouseAction},
    style::AttrMask,
};
use pathviz_search::{Board, DijkstraSearch, Outcome};
use rand::RngExt;

use crate::colors::*;

pub const BOARD_WIDTH: i32 = 30;
pub const BOARD_HEIGHT: i32 = 20;

/// Screen size: the board plus a status line and a key-hint line.
pub const UI_WIDTH: i32 = 60;
pub const UI_HEIGHT: i32 = BOARD_HEIGHT + 2;

/// Pause between animated expansions.
const STEP_DELAY: Duration = Duration::from_millis(50);

/// Wall density of the random scatter, in percent.
const RANDOM_WALL_PERCENT: i32 = 28;

const HELP_TEXT: &str = "\
Dijkstra shortest-path visualizer

Click a cell to toggle a wall.
Press on S or E and drag to move a marker.
Drag across open cells to paint walls.

space / enter   run the search
c               clear the path
R               reset the grid
m               scatter random walls
q / esc         quit

Press any key to return.";

/// UI mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Edit,
    Running,
    Help,
}

/// What a held mouse button is currently dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Start,
    End,
    Walls { last: Point },
}

/// The visualizer model.
pub struct VizModel {
    board: Board,
    search: DijkstraSearch,
    mode: Mode,
    drag: Option<Drag>,
    status: String,
}

impl Default for VizModel {
    fn default() -> Self {
        Self::new()
    }
}

impl VizModel {
    pub fn new() -> Self {
        let board = Board::new(BOARD_WIDTH, BOARD_HEIGHT);
        let search = DijkstraSearch::new(board.bounds());
        Self {
            board,
            search,
            mode: Mode::Edit,
            drag: None,
            status: String::new(),
        }
    }
}

/// Delayed animation heartbeat, run off the main loop.
fn schedule_tick() -> Effect {
    app::cmd(|| {
        std::thread::sleep(STEP_DELAY);
        Some(Msg::tick())
    })
}

fn is_quit(key: &Key, modifiers: ModMask) -> bool {
    matches!(key, Key::Char('q') | Key::Escape)
        || (modifiers.contains(ModMask::CTRL) && matches!(key, Key::Char('c')))
}

impl pathviz_core::app::Model for VizModel {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                self.status = "Ready. Click to create walls, drag start/end points.".into();
                None
            }
            Msg::Quit => Some(Effect::End),
            _ => match self.mode {
                Mode::Edit => self.update_edit(msg),
                Mode::Running => self.update_running(msg),
                Mode::Help => self.update_help(msg),
            },
        }
    }

    fn draw(&self, grid: &mut Grid) {
        grid.fill(Cell::default());
        match self.mode {
            Mode::Help => self.draw_help(grid),
            _ => {
                self.draw_board(grid);
                self.draw_status(grid);
            }
        }
    }
}

impl VizModel {
    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn update_edit(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { key, modifiers, .. } => self.handle_edit_key(key, modifiers),
            Msg::Mouse { action, pos, .. } => {
                self.handle_edit_mouse(action, pos);
                None
            }
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: Key, modifiers: ModMask) -> Option<Effect> {
        if is_quit(&key, modifiers) {
            return Some(Effect::End);
        }
        match key {
            Key::Char(' ') | Key::Enter => self.start_run(),
            Key::Char('c') => {
                self.search.reset();
                self.status = "Path cleared.".into();
                None
            }
            Key::Char('R') => {
                self.board.clear_walls();
                self.search.reset();
                self.status = "Grid reset.".into();
                None
            }
            Key::Char('m') => {
                self.scatter_walls();
                None
            }
            Key::Char('?') => {
                self.mode = Mode::Help;
                None
            }
            _ => None,
        }
    }

    fn handle_edit_mouse(&mut self, action: MouseAction, pos: Point) {
        match action {
            MouseAction::Main => {
                if !self.board.contains(pos) {
                    return;
                }
                if pos == self.board.start() {
                    self.drag = Some(Drag::Start);
                } else if pos == self.board.end() {
                    self.drag = Some(Drag::End);
                } else {
                    self.board.toggle_wall(pos);
                    self.drag = Some(Drag::Walls { last: pos });
                }
            }
            MouseAction::Move => match self.drag {
                Some(Drag::Start) => self.board.move_start(pos),
                Some(Drag::End) => self.board.move_end(pos),
                Some(Drag::Walls { last }) => {
                    if pos != last && self.board.contains(pos) {
                        self.board.toggle_wall(pos);
                        self.drag = Some(Drag::Walls { last: pos });
                    }
                }
                None => {}
            },
            MouseAction::Release => self.drag = None,
            MouseAction::Secondary => {}
        }
    }

    fn start_run(&mut self) -> Option<Effect> {
        self.search.reset();
        if !self.search.begin(&self.board) {
            return None;
        }
        self.drag = None;
        self.mode = Mode::Running;
        self.status = "Running Dijkstra's algorithm...".into();
        Some(schedule_tick())
    }

    fn update_running(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Tick { .. } => {
                if self.search.step(&self.board).is_some() {
                    return Some(schedule_tick());
                }
                self.finish_run();
                None
            }
            Msg::KeyDown { key, modifiers, .. } if is_quit(&key, modifiers) => Some(Effect::End),
            // wall and marker edits are rejected while a run is active
            _ => None,
        }
    }

    fn finish_run(&mut self) {
        self.mode = Mode::Edit;
        match self.search.outcome() {
            Some(Outcome::Found) => {
                let len = self.search.distance_at(self.board.end());
                self.status = format!("Path found! Length: {len}.");
                info!("path found, length {len}");
            }
            _ => {
                self.status = "No path found.".into();
                info!("no path found");
            }
        }
    }

    fn update_help(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::KeyDown { .. }
            | Msg::Mouse {
                action: MouseAction::Main,
                ..
            } => {
                self.mode = Mode::Edit;
                None
            }
            _ => None,
        }
    }

    fn scatter_walls(&mut self) {
        let mut rng = rand::rng();
        self.search.reset();
        self.board.clear_walls();
        for p in self.board.bounds().iter() {
            if rng.random_range(0..100) < RANDOM_WALL_PERCENT {
                // marker cells are skipped by the board guard
                self.board.set_wall(p, true);
            }
        }
        self.status = "Random walls scattered.".into();
    }

    // -------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------

    fn draw_board(&self, grid: &mut Grid) {
        for p in self.board.bounds().iter() {
            let (ch, fg, attrs) = if p == self.board.start() {
                ('S', START_FG, AttrMask::BOLD)
            } else if p == self.board.end() {
                ('E', END_FG, AttrMask::BOLD)
            } else if self.board.is_wall(p) {
                ('#', WALL_FG, AttrMask::NONE)
            } else if self.search.current() == Some(p) {
                ('@', CURRENT_FG, AttrMask::BOLD)
            } else if self.search.on_path(p) {
                ('*', PATH_FG, AttrMask::BOLD)
            } else if self.search.visited(p) {
                ('+', VISITED_FG, AttrMask::NONE)
            } else if self.search.frontier(p) {
                ('·', FRONTIER_FG, AttrMask::NONE)
            } else {
                ('.', EMPTY_FG, AttrMask::DIM)
            };
            let style = Style::default().with_fg(fg).with_attrs(attrs);
            grid.set(p, Cell::default().with_char(ch).with_style(style));
        }
    }

    fn draw_status(&self, grid: &mut Grid) {
        let area = grid.slice(Range::new(0, BOARD_HEIGHT, UI_WIDTH, UI_HEIGHT));
        let top = area.bounds().min;
        draw_text(
            &area,
            top,
            &self.status,
            Style::default().with_fg(STATUS_FG),
        );
        draw_text(
            &area,
            top.shift(0, 1),
            "space run  c clear  R reset  m random  ? help  q quit",
            Style::default().with_fg(HINT_FG),
        );
    }

    fn draw_help(&self, grid: &mut Grid) {
        let style = Style::default();
        for (i, line) in HELP_TEXT.lines().enumerate() {
            draw_text(grid, Point::new(1, 1 + i as i32), line, style);
        }
    }
}

/// Write `text` left to right starting at `at`; characters outside the grid
/// bounds are clipped.
fn draw_text(grid: &Grid, at: Point, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        grid.set(
            at.shift(i as i32, 0),
            Cell::default().with_char(ch).with_style(style),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::app::Model;
    use std::time::Instant;

    fn click(x: i32, y: i32) -> Msg {
        Msg::Mouse {
            action: MouseAction::Main,
            pos: Point::new(x, y),
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    fn mouse(action: MouseAction, x: i32, y: i32) -> Msg {
        Msg::Mouse {
            action,
            pos: Point::new(x, y),
            modifiers: ModMask::NONE,
            time: Instant::now(),
        }
    }

    fn model() -> VizModel {
        let mut m = VizModel::new();
        m.update(Msg::Init);
        m
    }

    #[test]
    fn click_toggles_wall() {
        let mut m = model();
        let p = Point::new(1, 1);
        m.update(click(1, 1));
        assert!(m.board.is_wall(p));
        m.update(mouse(MouseAction::Release, 1, 1));
        m.update(click(1, 1));
        assert!(!m.board.is_wall(p));
    }

    #[test]
    fn drag_paints_walls_once_per_cell() {
        let mut m = model();
        m.update(click(2, 2));
        m.update(mouse(MouseAction::Move, 3, 2));
        // repeated move events over the same cell must not re-toggle
        m.update(mouse(MouseAction::Move, 3, 2));
        m.update(mouse(MouseAction::Release, 3, 2));
        assert!(m.board.is_wall(Point::new(2, 2)));
        assert!(m.board.is_wall(Point::new(3, 2)));
    }

    #[test]
    fn marker_drag_relocates_start() {
        let mut m = model();
        let start = m.board.start();
        m.update(click(start.x, start.y));
        m.update(mouse(MouseAction::Move, start.x + 1, start.y));
        m.update(mouse(MouseAction::Release, start.x + 1, start.y));
        assert_eq!(m.board.start(), start.shift(1, 0));
        assert!(!m.board.is_wall(start));
    }

    #[test]
    fn run_animates_to_completion() {
        let mut m = model();
        let effect = m.update(Msg::key(Key::Char(' ')));
        assert!(effect.is_some());
        assert!(m.search.is_running());
        assert_eq!(m.mode, Mode::Running);

        let mut guard = 0;
        while m.mode == Mode::Running {
            m.update(Msg::tick());
            guard += 1;
            assert!(guard < 2000, "run did not terminate");
        }
        assert!(m.status.starts_with("Path found"));
        assert!(m.search.on_path(m.board.end()));
    }

    #[test]
    fn edits_rejected_while_running() {
        let mut m = model();
        m.update(Msg::key(Key::Enter));
        assert!(m.search.is_running());

        m.update(click(1, 1));
        assert!(!m.board.is_wall(Point::new(1, 1)));

        // run command is also a no-op while active
        let effect = m.update(Msg::key(Key::Char(' ')));
        assert!(effect.is_none());
        assert!(m.search.is_running());
    }

    #[test]
    fn reset_grid_clears_walls() {
        let mut m = model();
        m.update(click(4, 4));
        m.update(mouse(MouseAction::Release, 4, 4));
        assert!(m.board.is_wall(Point::new(4, 4)));
        m.update(Msg::key(Key::Char('R')));
        assert!(!m.board.is_wall(Point::new(4, 4)));
        assert_eq!(m.status, "Grid reset.");
    }

    #[test]
    fn clear_path_after_run() {
        let mut m = model();
        m.update(Msg::key(Key::Char(' ')));
        let mut guard = 0;
        while m.mode == Mode::Running {
            m.update(Msg::tick());
            guard += 1;
            assert!(guard < 2000, "run did not terminate");
        }
        m.update(Msg::key(Key::Char('c')));
        assert!(!m.search.on_path(m.board.end()));
        assert_eq!(m.status, "Path cleared.");
    }

    #[test]
    fn tick_ignored_when_idle() {
        let mut m = model();
        assert!(m.update(Msg::tick()).is_none());
        assert_eq!(m.mode, Mode::Edit);
    }

    #[test]
    fn quit_keys_end_the_app() {
        let mut m = model();
        assert!(matches!(m.update(Msg::key(Key::Char('q'))), Some(Effect::End)));
        let mut m = model();
        assert!(matches!(m.update(Msg::key(Key::Escape)), Some(Effect::End)));
        let mut m = model();
        let ctrl_c = Msg::KeyDown {
            key: Key::Char('c'),
            modifiers: ModMask::CTRL,
            time: Instant::now(),
        };
        assert!(matches!(m.update(ctrl_c), Some(Effect::End)));
    }

    #[test]
    fn help_mode_round_trip() {
        let mut m = model();
        m.update(Msg::key(Key::Char('?')));
        assert_eq!(m.mode, Mode::Help);
        m.update(Msg::key(Key::Char('x')));
        assert_eq!(m.mode, Mode::Edit);
    }

    #[test]
    fn scatter_respects_markers() {
        let mut m = model();
        m.update(Msg::key(Key::Char('m')));
        assert!(!m.board.is_wall(m.board.start()));
        assert!(!m.board.is_wall(m.board.end()));
    }

    #[test]
    fn draw_renders_markers_and_status() {
        let m = model();
        let mut grid = Grid::new(UI_WIDTH, UI_HEIGHT);
        m.draw(&mut grid);
        assert_eq!(grid.at(m.board.start()).ch, 'S');
        assert_eq!(grid.at(m.board.end()).ch, 'E');
        // status line starts below the board ("Ready. ...")
        assert_eq!(grid.at(Point::new(0, BOARD_HEIGHT)).ch, 'R');
    }
}
