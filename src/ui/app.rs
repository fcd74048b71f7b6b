//! Main application for the Tic-Tac-Toe GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use tracing::{info, warn};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameState};
use super::theme::*;
use crate::board::STANDARD_SIZES;
use crate::config::AppConfig;
use crate::{engine, rules, Player};

/// Which page the window shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    ModeSelect,
    SizeSelect(GameMode),
    Playing,
}

/// User requests collected while drawing, applied after the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    ChooseMode(GameMode),
    ChooseSize(usize),
    Back,
    Restart,
    BackToMenu,
    Hint,
    Quit,
}

/// Main Tic-Tac-Toe application
pub struct TicTacToeApp {
    screen: Screen,
    state: Option<GameState>,
    board_view: BoardView,
    config: AppConfig,
    show_debug: bool,
}

impl TicTacToeApp {
    /// Create the app; a configured mode and size skip the menus
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let mut app = Self {
            screen: Screen::ModeSelect,
            state: None,
            board_view: BoardView::default(),
            config,
            show_debug: false,
        };

        match (app.config.game.mode, app.config.game.size) {
            (Some(mode), Some(size)) => app.start_game(mode, size),
            (Some(mode), None) => app.screen = Screen::SizeSelect(mode),
            _ => {}
        }
        app
    }

    fn start_game(&mut self, mode: GameMode, size: usize) {
        let Some(state) = GameState::new(mode, size, self.config.computer_delay()) else {
            warn!(size, "cannot start a game on this board size");
            self.screen = Screen::SizeSelect(mode);
            return;
        };
        info!(?mode, size, "starting game");
        self.state = Some(state);
        self.screen = Screen::Playing;
    }

    fn apply(&mut self, ctx: &Context, action: Action) {
        match action {
            Action::ChooseMode(mode) => match self.config.game.size {
                Some(size) => self.start_game(mode, size),
                None => self.screen = Screen::SizeSelect(mode),
            },
            Action::ChooseSize(size) => {
                if let Screen::SizeSelect(mode) = self.screen {
                    self.start_game(mode, size);
                }
            }
            Action::Back => self.screen = Screen::ModeSelect,
            Action::Restart => {
                if let Some(state) = self.state.as_mut() {
                    state.restart();
                }
            }
            Action::BackToMenu => {
                // Leaving the game drops its score and cancels its searches
                self.state = None;
                self.screen = Screen::ModeSelect;
            }
            Action::Hint => {
                if let Some(state) = self.state.as_mut() {
                    state.request_suggestion();
                }
            }
            Action::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    /// Big blue button used on the menu pages
    fn menu_button(ui: &mut egui::Ui, text: &str) -> bool {
        ui.scope(|ui| {
            let widgets = &mut ui.visuals_mut().widgets;
            widgets.inactive.weak_bg_fill = BUTTON_BG;
            widgets.hovered.weak_bg_fill = BUTTON_HOVER;
            widgets.active.weak_bg_fill = BUTTON_HOVER;

            let button = egui::Button::new(RichText::new(text).size(22.0).strong().color(TEXT_ON_BUTTON))
                .corner_radius(CornerRadius::same(8))
                .min_size(Vec2::new(320.0, 56.0));
            ui.add(button).clicked()
        })
        .inner
    }

    fn menu_frame() -> Frame {
        Frame::new().fill(BACKGROUND).inner_margin(24.0)
    }

    /// Render the first menu page
    fn render_mode_select(&self, ctx: &Context, actions: &mut Vec<Action>) {
        CentralPanel::default().frame(Self::menu_frame()).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("Tic Tac Toe").size(40.0).strong().color(TEXT_TITLE));
                ui.label(RichText::new("Choose Mode and Size").size(18.0).color(TEXT_SECONDARY));
                ui.add_space(40.0);

                for mode in [GameMode::VsComputer, GameMode::TwoPlayer] {
                    if Self::menu_button(ui, mode.label()) {
                        actions.push(Action::ChooseMode(mode));
                    }
                    ui.add_space(16.0);
                }

                ui.add_space(24.0);
                if Self::menu_button(ui, "Quit") {
                    actions.push(Action::Quit);
                }
            });
        });
    }

    /// Render the board size page
    fn render_size_select(&self, ctx: &Context, mode: GameMode, actions: &mut Vec<Action>) {
        CentralPanel::default().frame(Self::menu_frame()).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("Tic Tac Toe").size(40.0).strong().color(TEXT_TITLE));
                ui.label(RichText::new(mode.label()).size(18.0).color(TEXT_SECONDARY));
                ui.add_space(40.0);

                for size in STANDARD_SIZES {
                    if Self::menu_button(ui, &format!("{size} x {size}")) {
                        actions.push(Action::ChooseSize(size));
                    }
                    ui.add_space(16.0);
                }

                ui.add_space(24.0);
                if Self::menu_button(ui, "Back") {
                    actions.push(Action::Back);
                }
            });
        });
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context, actions: &mut Vec<Action>) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("Restart (R)").clicked() {
                        actions.push(Action::Restart);
                        ui.close_menu();
                    }
                    if ui.button("Back to Menu (Esc)").clicked() {
                        actions.push(Action::BackToMenu);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        actions.push(Action::Quit);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                if let Some(state) = &self.state {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let size = state.board.size();
                        ui.label(format!("{} - {size}x{size}", state.mode.label()));
                    });
                }
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&self, ctx: &Context, actions: &mut Vec<Action>) {
        let Some(state) = &self.state else {
            return;
        };

        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG).inner_margin(8.0))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                Self::render_title_card(ui);
                ui.add_space(12.0);

                Self::render_turn_card(ui, state);
                ui.add_space(10.0);

                Self::render_score_card(ui, state);
                ui.add_space(10.0);

                Self::render_actions_card(ui, state, actions);

                if self.show_debug {
                    ui.add_space(10.0);
                    Self::render_debug_card(ui, state);
                }

                if state.is_over() {
                    ui.add_space(10.0);
                    Self::render_game_over_card(ui, state, actions);
                }

                if let Some(msg) = &state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_title_card(ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("X").size(22.0).strong().color(X_MARK));
            ui.label(RichText::new("O").size(22.0).strong().color(O_MARK));
            ui.add_space(4.0);
            ui.label(RichText::new("TIC TAC TOE").size(22.0).strong().color(TEXT_TITLE));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(ui: &mut egui::Ui, state: &GameState) {
        Self::card_frame().show(ui, |ui| {
            let player = state.current_player();

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, BACKGROUND);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    player.symbol(),
                    egui::FontId::proportional(28.0),
                    mark_color(player),
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(player_name(state.mode, player)).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if state.is_ai_thinking() {
                        ("Computer thinking...", TIMER_WARNING)
                    } else if state.is_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_score_card(ui: &mut egui::Ui, state: &GameState) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("SCORE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            for player in [Player::X, Player::O] {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(player.symbol()).size(18.0).strong().color(mark_color(player)));
                    ui.label(RichText::new(player_name(state.mode, player)).size(13.0).color(TEXT_SECONDARY));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let wins = state.score.wins(player);
                        ui.label(RichText::new(wins.to_string()).size(18.0).strong().color(TEXT_PRIMARY));
                    });
                });
            }

            ui.add_space(4.0);
            ui.label(RichText::new(state.score.to_string()).size(10.0).color(TEXT_MUTED));
        });
    }

    fn render_actions_card(ui: &mut egui::Ui, state: &GameState, actions: &mut Vec<Action>) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Restart").clicked() {
                    actions.push(Action::Restart);
                }
                if ui.button("Back to Menu").clicked() {
                    actions.push(Action::BackToMenu);
                }
                if state.mode == GameMode::TwoPlayer {
                    let label = if state.is_hint_pending() { "Hint..." } else { "Hint" };
                    if ui.button(label).clicked() {
                        actions.push(Action::Hint);
                    }
                }
            });

            ui.add_space(8.0);
            let moves = state.board.cells().iter().filter(|cell| !cell.is_empty()).count();
            ui.label(RichText::new(format!("Move #{moves}")).size(11.0).color(TEXT_SECONDARY));
        });
    }

    fn render_debug_card(ui: &mut egui::Ui, state: &GameState) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = state.ai_thinking_elapsed() {
                ui.label(
                    RichText::new(format!("Searching {:.2}s", elapsed.as_secs_f32()))
                        .size(11.0)
                        .color(TIMER_WARNING),
                );
            }

            if let Some(result) = &state.last_ai_result {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("Score: {}", result.score)).size(11.0).strong().color(TIMER_NORMAL));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("-> {pos}")).size(12.0).strong().color(WIN_HIGHLIGHT));
                }
            } else {
                ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
            }
        });
    }

    fn render_game_over_card(ui: &mut egui::Ui, state: &GameState, actions: &mut Vec<Action>) {
        let (text, color) = result_banner(engine::winner(&state.board));

        Self::card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("GAME OVER").size(12.0).color(TEXT_MUTED));
                ui.add_space(8.0);
                ui.label(RichText::new(text).size(22.0).strong().color(color));
                ui.add_space(12.0);
                if ui.button("Play Again").clicked() {
                    actions.push(Action::Restart);
                }
            });
        });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new(msg).size(11.0).color(TIMER_WARNING));
        });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default()
            .frame(Frame::new().fill(BACKGROUND).inner_margin(10.0))
            .show(ctx, |ui| {
                let Some(state) = self.state.as_mut() else {
                    return;
                };

                if state.is_over() {
                    let (text, color) = result_banner(engine::winner(&state.board));
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(text).size(36.0).strong().color(color));
                        ui.label(
                            RichText::new("Click Restart button or Back to Menu")
                                .size(14.0)
                                .color(TEXT_SECONDARY),
                        );
                    });
                }

                let winning_line =
                    engine::winner(&state.board).and_then(|player| rules::winning_line(&state.board, player));
                let accept_input = state.is_human_turn() && !state.is_ai_thinking();

                ui.vertical_centered(|ui| {
                    let clicked = self.board_view.show(
                        ui,
                        &state.board,
                        state.mark_scales(),
                        state.last_move,
                        state.suggested_move,
                        winning_line.as_deref(),
                        accept_input,
                    );

                    if let Some(pos) = clicked {
                        if let Err(msg) = state.try_place(pos) {
                            state.message = Some(msg);
                        }
                    }
                });
            });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) -> Vec<Action> {
        let mut actions = Vec::new();
        let screen = self.screen;

        ctx.input(|i| match screen {
            Screen::Playing => {
                if i.key_pressed(egui::Key::R) {
                    actions.push(Action::Restart);
                }
                if i.key_pressed(egui::Key::Escape) {
                    actions.push(Action::BackToMenu);
                }
                if i.key_pressed(egui::Key::H) {
                    actions.push(Action::Hint);
                }
                if i.key_pressed(egui::Key::D) {
                    self.show_debug = !self.show_debug;
                }
            }
            Screen::SizeSelect(_) => {
                if i.key_pressed(egui::Key::Escape) {
                    actions.push(Action::Back);
                }
            }
            Screen::ModeSelect => {}
        });

        actions
    }
}

impl eframe::App for TicTacToeApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut actions = self.handle_input(ctx);

        let mut animating = false;
        if let Some(state) = self.state.as_mut() {
            state.check_ai_result();
            state.check_hint();
            state.start_ai_thinking();
            animating = state.tick_animation();
        }

        match self.screen {
            Screen::ModeSelect => self.render_mode_select(ctx, &mut actions),
            Screen::SizeSelect(mode) => self.render_size_select(ctx, mode, &mut actions),
            Screen::Playing => {
                self.render_menu_bar(ctx, &mut actions);
                self.render_side_panel(ctx, &mut actions);
                self.render_board(ctx);
            }
        }

        for action in actions {
            self.apply(ctx, action);
        }

        // Keep frames coming while a search runs or a mark is still growing
        let busy = self
            .state
            .as_ref()
            .is_some_and(|state| state.is_ai_thinking() || state.is_hint_pending());
        if busy || animating {
            ctx.request_repaint();
        }
    }
}

/// Banner text and color for a finished round
fn result_banner(winner: Option<Player>) -> (String, egui::Color32) {
    match winner {
        Some(player) => (format!("Player {} Wins!", player.symbol()), RESULT_TEXT),
        None => ("Match Draw!".to_string(), DRAW_TEXT),
    }
}

fn player_name(mode: GameMode, player: Player) -> &'static str {
    match (mode, player) {
        (_, Player::X) => "Player 1",
        (GameMode::VsComputer, Player::O) => "Computer",
        (GameMode::TwoPlayer, Player::O) => "Player 2",
    }
}
