pub mod maze_store;
pub mod run;
pub mod session;
