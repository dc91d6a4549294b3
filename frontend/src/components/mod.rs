pub mod header;
pub mod hero;
pub mod leaderboard;
pub mod points;
pub mod quotes;
pub mod rewards;
pub mod scanner;
pub mod toasts;
pub mod utils;
