pub mod article;
pub mod doa;
pub mod hijri;
pub mod prayer;
pub mod rutinan;
