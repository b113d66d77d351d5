pub mod countdown_loop;
