pub mod alanwar_client;
pub mod http;
pub mod myquran_client;
