//! Game state management for the Ultimate Tic-Tac-Toe GUI

use crate::{AIEngine, EngineConfig, Move, MoveResult, Outcome, Player, Position, Result};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

/// AI search depth in Player-vs-AI games
const AI_DEPTH: u8 = 8;
/// AI time budget per move
const AI_TIME_LIMIT_MS: u64 = 1_000;
/// Hint search depth in Player-vs-Player games
const HINT_DEPTH: u8 = 5;
const AI_TT_CAPACITY: usize = 1_000_003;
const HINT_TT_CAPACITY: usize = 65_537;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs AI
    PvE { human: Player },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE { human: Player::X }
    }
}

/// AI computation state
pub enum AiState {
    Idle,
    Thinking {
        receiver: Receiver<Result<MoveResult>>,
        start_time: Instant,
    },
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state.
///
/// The position only ever moves forward; there is no undo.
pub struct GameState {
    pub position: Position,
    pub mode: GameMode,
    pub last_move: Option<Move>,
    pub move_count: usize,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Move>,
    pub message: Option<String>,
}

impl GameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            position: Position::new(),
            mode,
            last_move: None,
            move_count: 0,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
        }
    }

    /// Start over in the same mode. A running AI search is abandoned.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    #[inline]
    pub fn current_turn(&self) -> Player {
        self.position.to_move()
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.position.global_outcome()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn() == human,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the AI's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human } => self.current_turn() != human,
            GameMode::PvP => false,
        }
    }

    /// Check if AI is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt a human move. The error text is shown to the player.
    pub fn try_play(&mut self, mv: Move) -> std::result::Result<(), String> {
        if self.is_game_over() {
            return Err("Game is over".to_string());
        }

        if self.is_ai_thinking() {
            return Err("AI is thinking".to_string());
        }

        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        self.execute_move(mv).map_err(|e| e.to_string())
    }

    /// Execute a move (for both human and AI)
    fn execute_move(&mut self, mv: Move) -> Result<()> {
        self.position.play(mv)?;

        self.last_move = Some(mv);
        self.move_count += 1;
        self.suggested_move = None;
        self.message = None;

        self.move_timer.stop();
        if !self.is_game_over() {
            self.move_timer.start();
        }
        Ok(())
    }

    /// Start AI thinking on a worker thread
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.is_game_over() {
            return;
        }

        let position = self.position.clone();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let config = EngineConfig::default()
                .with_tt_capacity(AI_TT_CAPACITY)
                .with_max_depth(AI_DEPTH)
                .with_time_limit_ms(AI_TIME_LIMIT_MS);
            let result = AIEngine::with_config(config)
                .and_then(|mut engine| engine.get_move_with_stats(&position));
            let _ = tx.send(result);
        });

        self.ai_state = AiState::Thinking {
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if AI has finished thinking
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking {
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(result) => Some((result, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("AI error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        if let Some((result, elapsed)) = result {
            self.ai_state = AiState::Idle;
            self.move_timer.set_ai_time(elapsed);

            match result {
                Ok(move_result) => {
                    let mv = move_result.best_move;
                    self.last_ai_result = Some(move_result);
                    if let Err(e) = self.execute_move(mv) {
                        self.message = Some(e.to_string());
                    }
                }
                Err(e) => self.message = Some(e.to_string()),
            }
        }
    }

    /// Get AI thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Request move suggestion for PvP mode
    pub fn request_suggestion(&mut self) {
        if self.is_game_over() || self.is_ai_thinking() {
            return;
        }

        let config = EngineConfig::default()
            .with_tt_capacity(HINT_TT_CAPACITY)
            .with_max_depth(HINT_DEPTH);
        let result = AIEngine::with_config(config)
            .and_then(|mut engine| engine.get_move_with_stats(&self.position));

        match result {
            Ok(result) => {
                self.suggested_move = Some(result.best_move);
                self.last_ai_result = Some(result);
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }
}
