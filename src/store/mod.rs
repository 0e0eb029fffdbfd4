pub mod leaderboard;
pub mod profiles;
pub mod timing;
