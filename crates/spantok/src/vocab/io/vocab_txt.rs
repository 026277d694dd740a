//! # ``vocab.txt`` Vocabulary IO
//!
//! One token per line; the line number is the id.

use crate::errors::TokenizerError;
use crate::types::TokenType;
use crate::vocab::{SpecialTokens, Vocabulary, VocabularyBuilder};
use anyhow::Context;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Load a [`Vocabulary`] from a ``vocab.txt`` file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
/// * `specials` - role assignments; missing special strings are appended.
pub fn load_vocab_from_txt_path<T, P>(
    path: P,
    specials: &SpecialTokens,
) -> anyhow::Result<Vocabulary<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening vocabulary {}", path.display()))?;
    let reader = BufReader::new(file);

    let vocab = load_vocab_from_txt_reader(reader, specials)
        .with_context(|| format!("reading vocabulary {}", path.display()))?;

    log::info!(
        "loaded {} tokens from {}",
        vocab.size(),
        path.display()
    );
    Ok(vocab)
}

/// Load a [`Vocabulary`] from a ``vocab.txt`` [`BufRead`] stream.
///
/// Trailing ``\r`` is stripped; blank lines are errors.
pub fn load_vocab_from_txt_reader<T, R>(
    reader: R,
    specials: &SpecialTokens,
) -> anyhow::Result<Vocabulary<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(TokenizerError::from)?;
        let token = line.strip_suffix('\r').unwrap_or(&line);
        tokens.push(token.to_string());
    }

    let vocab = VocabularyBuilder::new()
        .with_tokens(tokens)
        .with_specials(specials.iter().map(|(&role, s)| (role, s.as_str())))
        .build()?;
    Ok(vocab)
}

/// Save a [`Vocabulary`] to a ``vocab.txt`` file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_vocab_to_txt_path<T: TokenType, P: AsRef<Path>>(
    vocab: &Vocabulary<T>,
    path: P,
) -> anyhow::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);

    save_vocab_to_txt_writer(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save a [`Vocabulary`] to a [`Write`] writer.
pub fn save_vocab_to_txt_writer<T, W>(
    vocab: &Vocabulary<T>,
    writer: &mut W,
) -> anyhow::Result<()>
where
    T: TokenType,
    W: Write,
{
    for token in vocab.tokens() {
        anyhow::ensure!(
            !token.contains('\n'),
            "token {token:?} cannot be written to a line-oriented vocabulary"
        );
        writeln!(writer, "{token}")?;
    }
    Ok(())
}
