pub mod list;
pub mod run;
pub mod theme;
pub mod themes;
