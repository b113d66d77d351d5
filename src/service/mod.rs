pub mod article_service;
pub mod clock;
pub mod content_service;
pub mod display;
pub mod doa_service;
pub mod home_service;
pub mod myquran_service;
pub mod prayer_selector;
pub mod recurrence;
pub mod routine_service;
