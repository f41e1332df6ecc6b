use std::thread;

use once_cell::sync::OnceCell;
use raylib::color::Color;
use raylib::prelude::*;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::game::{BOARD_SIZE, GameResult, MoveError, Otrio, Player, Size};

pub const DEFAULT_CELL_SIZE: i32 = 160;
pub const MIN_CELL_SIZE: i32 = 60;
pub const DEFAULT_FPS: u32 = 60;

const FONT_SIZE: i32 = 20;
const LINE_HEIGHT: i32 = FONT_SIZE + 8;
const STATUS_LINES: i32 = 4;
const RING_WIDTH: i32 = 4;
const GRID_LINEWIDTH: i32 = 2;

// Rendering only happens on the thread that opened the window
static MAIN_THREAD_ID: OnceCell<thread::ThreadId> = OnceCell::new();

const BACKGROUND: Color = Color::new(20, 20, 24, 255);
const GRID_COLOR: Color = Color::new(100, 100, 100, 255);
const TEXT_COLOR: Color = Color::new(220, 220, 220, 255);
const BANNER_COLOR: Color = Color::new(255, 215, 90, 255);
const ERROR_COLOR: Color = Color::new(255, 160, 160, 255);

#[derive(Debug)]
struct Client {
    rl: RaylibHandle,
    thread: RaylibThread,
}

/// Adapter state around a game: the size the player has selected and the
/// last rejection to show. Neither is part of the game itself.
#[derive(Debug, Clone)]
pub struct Gui {
    game: Otrio,
    selected: Size,
    rejection: Option<MoveError>,
    cell_size: i32,
}

impl Gui {
    pub fn new(cell_size: i32) -> Self {
        Gui {
            game: Otrio::new(),
            selected: Size::Small,
            rejection: None,
            cell_size,
        }
    }

    pub fn game(&self) -> &Otrio {
        &self.game
    }

    pub fn selected(&self) -> Size {
        self.selected
    }

    fn board_pixels(&self) -> i32 {
        self.cell_size * BOARD_SIZE as i32
    }

    fn window_size(&self) -> (i32, i32) {
        let status_height = STATUS_LINES * LINE_HEIGHT + LINE_HEIGHT / 2;
        (self.board_pixels(), self.board_pixels() + status_height)
    }

    /// Size selection and reset. Returns whether the key did anything.
    pub fn handle_key(&mut self, key: KeyboardKey) -> bool {
        if let Some(size) = size_for_key(key) {
            self.selected = size;
            debug!(%size, "size selected");
            return true;
        }
        if matches!(key, KeyboardKey::KEY_R) {
            self.game.reset();
            self.rejection = None;
            return true;
        }
        false
    }

    /// Plays the selected size on the clicked cell. Clicks outside the
    /// board or after the game ended are ignored.
    pub fn handle_click(&mut self, x: i32, y: i32) {
        if self.game.is_game_over() {
            return;
        }
        let Some((row, col)) = cell_at(x, y, self.cell_size) else {
            return;
        };
        match self.game.place(self.selected, row, col) {
            Ok(_) => self.rejection = None,
            Err(err) => self.rejection = Some(err),
        }
    }

    fn render_client(&self, fps: u32) -> Client {
        let (width, height) = self.window_size();
        let (mut rl, thread) = raylib::init()
            .size(width, height)
            .title("Otrio")
            .build();
        rl.set_target_fps(fps);
        Client { rl, thread }
    }

    fn poll(&mut self, client: &mut Client) {
        for key in [
            KeyboardKey::KEY_S,
            KeyboardKey::KEY_M,
            KeyboardKey::KEY_L,
            KeyboardKey::KEY_ONE,
            KeyboardKey::KEY_TWO,
            KeyboardKey::KEY_THREE,
            KeyboardKey::KEY_R,
        ] {
            if client.rl.is_key_pressed(key) {
                self.handle_key(key);
            }
        }
        if client
            .rl
            .is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)
        {
            let (x, y) = (client.rl.get_mouse_x(), client.rl.get_mouse_y());
            self.handle_click(x, y);
        }
    }

    fn render(&self, client: &mut Client) {
        let main_thread_id = MAIN_THREAD_ID.get_or_init(|| thread::current().id());
        assert_eq!(
            *main_thread_id,
            thread::current().id(),
            "Rendering must be called from the main thread"
        );

        let board_pixels = self.board_pixels();
        let mut d = client.rl.begin_drawing(&client.thread);
        d.clear_background(BACKGROUND);

        // Grid lines between cells
        for i in 1..BOARD_SIZE as i32 {
            let offset = i * self.cell_size - GRID_LINEWIDTH / 2;
            d.draw_rectangle(offset, 0, GRID_LINEWIDTH, board_pixels, GRID_COLOR);
            d.draw_rectangle(0, offset, board_pixels, GRID_LINEWIDTH, GRID_COLOR);
        }
        d.draw_rectangle(0, board_pixels, board_pixels, GRID_LINEWIDTH, GRID_COLOR);

        // Stacks, bottom piece first
        for (row, col, cell) in self.game.board().cells() {
            let center_x = col as i32 * self.cell_size + self.cell_size / 2;
            let center_y = row as i32 * self.cell_size + self.cell_size / 2;
            for piece in cell.pieces() {
                let radius = piece_radius(piece.size, self.cell_size);
                let color = owner_color(piece.owner);
                for t in 0..RING_WIDTH {
                    d.draw_circle_lines(center_x, center_y, radius - t as f32, color);
                }
            }
        }

        // Status strip
        let left = 8;
        let mut y = board_pixels + LINE_HEIGHT / 2;
        let headline = match self.game.result() {
            Some(GameResult::Win(player)) => format!("*** {player} wins! ***  (R to restart)"),
            Some(GameResult::Draw) => "*** Draw: no legal move left ***  (R to restart)".to_owned(),
            None => format!(
                "{} to move, size: {}",
                self.game.current_player(),
                self.selected
            ),
        };
        let headline_color = if self.game.is_game_over() {
            BANNER_COLOR
        } else {
            owner_color(self.game.current_player())
        };
        d.draw_text(&headline, left, y, FONT_SIZE, headline_color);

        for player in Player::iter() {
            y += LINE_HEIGHT;
            let line = format!("{player}: {}", self.game.inventory(player));
            d.draw_text(&line, left, y, FONT_SIZE, TEXT_COLOR);
        }

        y += LINE_HEIGHT;
        if let Some(err) = self.rejection {
            d.draw_text(&err.to_string(), left, y, FONT_SIZE, ERROR_COLOR);
        } else {
            d.draw_text("S/M/L: size  R: reset", left, y, FONT_SIZE, GRID_COLOR);
        }
    }
}

/// Board cell under a pixel, by integer division with the cell size.
pub fn cell_at(x: i32, y: i32, cell_size: i32) -> Option<(usize, usize)> {
    if x < 0 || y < 0 || cell_size <= 0 {
        return None;
    }
    let row = usize::try_from(y / cell_size).ok()?;
    let col = usize::try_from(x / cell_size).ok()?;
    Otrio::is_valid_coordinate(row, col).then_some((row, col))
}

pub fn size_for_key(key: KeyboardKey) -> Option<Size> {
    match key {
        KeyboardKey::KEY_S | KeyboardKey::KEY_ONE => Some(Size::Small),
        KeyboardKey::KEY_M | KeyboardKey::KEY_TWO => Some(Size::Medium),
        KeyboardKey::KEY_L | KeyboardKey::KEY_THREE => Some(Size::Large),
        _ => None,
    }
}

fn piece_radius(size: Size, cell_size: i32) -> f32 {
    let fraction = match size {
        Size::Small => 0.14,
        Size::Medium => 0.28,
        Size::Large => 0.42,
    };
    cell_size as f32 * fraction
}

fn owner_color(player: Player) -> Color {
    match player {
        Player::One => Color::new(235, 90, 90, 255),
        Player::Two => Color::new(90, 150, 235, 255),
    }
}

/// Opens the window and runs the poll/redraw loop until it is closed.
pub fn run(cell_size: i32, fps: u32) {
    let mut gui = Gui::new(cell_size);
    let mut client = gui.render_client(fps);
    info!(cell_size, fps, "window opened");

    while !client.rl.window_should_close() && !client.rl.is_key_down(KeyboardKey::KEY_ESCAPE) {
        gui.poll(&mut client);
        gui.render(&mut client);
    }
    info!("window closed");
}
