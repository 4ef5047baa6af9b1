// Two-player chess match engine
// Board state, move legality, checkmate detection and turn-by-turn play

pub mod app;
pub mod board;
pub mod config;
pub mod console;
pub mod error;
pub mod game;
pub mod interaction;
pub mod pieces;
pub mod result;
pub mod rules;
pub mod storage;
