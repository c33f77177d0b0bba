//! Main application for the Ultimate Tic-Tac-Toe GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{GameMode, GameState};
use super::theme::*;
use crate::{Outcome, Player};

/// Main Ultimate Tic-Tac-Toe application
pub struct UtttApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for UtttApp {
    fn default() -> Self {
        Self {
            state: GameState::new(GameMode::default()),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

impl UtttApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    fn new_game(&mut self, mode: GameMode) {
        log::info!("New game: {mode:?}");
        self.state = GameState::new(mode);
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (PvE - play X)").clicked() {
                        self.new_game(GameMode::PvE { human: Player::X });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - play O)").clicked() {
                        self.new_game(GameMode::PvE { human: Player::O });
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP);
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { human } => format!("PvE - You: {human}"),
                        GameMode::PvP => "PvP - Hotseat".to_string(),
                    };
                    ui.label(mode_text);
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                let outcome = self.state.outcome();
                if outcome.is_terminal() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, outcome);
                }

                if let Some(msg) = &self.state.message {
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

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("X").size(20.0).strong().color(X_COLOR));
            ui.label(RichText::new("O").size(20.0).strong().color(O_COLOR));
            ui.add_space(4.0);
            ui.label(RichText::new("ULTIMATE TIC-TAC-TOE").size(18.0).strong().color(TEXT_PRIMARY));
        });
    }

    /// Render turn indicator card
    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn();
            let accent = match turn {
                Player::X => X_COLOR,
                Player::O => O_COLOR,
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, accent);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    turn.to_string(),
                    egui::FontId::proportional(26.0),
                    TEXT_PRIMARY,
                );

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(format!("{turn} to move")).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("AI thinking...", TIMER_WARNING)
                    } else if self.state.is_game_over() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));

                    let target = match self.state.position.forced_sub_board() {
                        Some(s) => format!("Play in sub-board {s}"),
                        None => "Play in any open sub-board".to_string(),
                    };
                    ui.label(RichText::new(target).size(11.0).color(TEXT_SECONDARY));
                });
            });
        });
    }

    /// Render timer card
    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.5 {
                    TIMER_NORMAL
                } else if secs < 1.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(RichText::new(format!("Last AI: {:.3}s", ai_time.as_secs_f32())).size(10.0).color(TEXT_SECONDARY));
            }
        });
    }

    /// Render actions card
    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                let btn_frame = Frame::new()
                    .fill(egui::Color32::from_rgb(50, 53, 58))
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0);

                btn_frame.show(ui, |ui| {
                    if ui.add(egui::Label::new(RichText::new("New Game").size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click())).clicked() {
                        self.state.reset();
                    }
                });

                ui.add_space(4.0);

                if self.state.mode == GameMode::PvP {
                    btn_frame.show(ui, |ui| {
                        if ui.add(egui::Label::new(RichText::new("Hint").size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click())).clicked() {
                            self.state.request_suggestion();
                        }
                    });
                }
            });

            ui.add_space(8.0);
            ui.label(RichText::new(format!("Move #{}", self.state.move_count)).size(11.0).color(TEXT_SECONDARY));
        });
    }

    /// Render debug card
    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("AI DEBUG").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(result) = &self.state.last_ai_result {
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(format!("{:?}", result.search_type)).size(11.0).strong().color(TIMER_NORMAL));
                        ui.label(RichText::new(format!("Score: {}", result.score)).size(10.0).color(TEXT_SECONDARY));
                        ui.label(RichText::new(format!("Depth: {}", result.depth)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                ui.add_space(4.0);
                ui.label(RichText::new(format!("-> {}", result.best_move)).size(12.0).strong().color(WIN_HIGHLIGHT));
                if result.aborted {
                    ui.label(RichText::new("search cut short").size(10.0).color(TIMER_WARNING));
                }
            } else {
                ui.label(RichText::new("Waiting for AI...").size(10.0).color(TEXT_MUTED));
            }
        });
    }

    /// Render game over card
    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: Outcome) {
        let (headline, accent) = match outcome {
            Outcome::Win(Player::X) => ("X WINS!", X_COLOR),
            Outcome::Win(Player::O) => ("O WINS!", O_COLOR),
            _ => ("DRAW", TEXT_SECONDARY),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(22.0).strong().color(accent));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            if ui.add(egui::Label::new(
                                RichText::new("New Game").size(14.0).strong().color(TEXT_PRIMARY)
                            ).sense(egui::Sense::click())).clicked() {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    /// Render status message card
    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    /// Render the main board
    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let interactive = self.state.is_human_turn() && !self.state.is_ai_thinking();

            let clicked = self.board_view.show(
                ui,
                &self.state.position,
                self.state.last_move,
                self.state.suggested_move,
                interactive,
            );

            if let Some(mv) = clicked {
                if let Err(msg) = self.state.try_play(mv) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Get hint (PvP mode)
            if i.key_pressed(egui::Key::H) && self.state.mode == GameMode::PvP {
                self.state.request_suggestion();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for UtttApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && !self.state.is_game_over() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}
