//! # Vocabulary IO

pub mod vocab_txt;

pub use vocab_txt::{
    load_vocab_from_txt_path, load_vocab_from_txt_reader, save_vocab_to_txt_path,
    save_vocab_to_txt_writer,
};
