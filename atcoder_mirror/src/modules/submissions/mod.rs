pub mod crawler;
pub mod planner;
pub mod scraper;
pub mod writer;
