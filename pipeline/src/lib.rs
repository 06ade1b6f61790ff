pub mod course;
pub mod courseextract;
pub mod currimap;
pub mod layout;
pub mod pdfextract;
pub mod runner;
pub mod table;
pub mod tablestore;
pub mod tabula_wrapper;
pub mod textutil;
#[cfg(test)]
mod testutil;
