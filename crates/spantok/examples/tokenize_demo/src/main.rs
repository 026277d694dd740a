use clap::Parser;
use spantok::provider::{DirectoryProvider, TokenizerBundle, TokenizerProvider};
use spantok::{
    Offset, OutputKind, SequenceTemplate, Tokenizer, TokenizerConfig, TokenizerKind,
    TokenizerType, Vocabulary,
};
use std::sync::Arc;

/// Show tokens, ids and original spans for a text.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Text to tokenize.
    #[arg(long, default_value = "#COVID19 cases are rising, aren't they?")]
    pub text: String,

    /// Tokenizer type: whitespace, rule, or subword.
    #[arg(long, default_value = "subword")]
    pub tokenizer: String,

    /// Model directory root; loads ``<model_dir>/<model_id>``.
    #[arg(long)]
    pub model_dir: Option<String>,

    /// Model id under `model_dir`.
    #[arg(long, default_value = "default")]
    pub model_id: String,

    /// Lowercase (rule and subword tokenizers).
    #[arg(long, default_value = "false")]
    pub lowercase: bool,

    /// XML-escape (rule and subword tokenizers).
    #[arg(long, default_value = "false")]
    pub escape: bool,

    /// Frame the ids with ``[CLS]``/``[SEP]``.
    #[arg(long, default_value = "false")]
    pub framed: bool,

    /// Enable verbose output.
    #[arg(long, default_value = "false")]
    pub verbose: bool,
}

fn demo_vocab() -> anyhow::Result<Arc<Vocabulary<u32>>> {
    let pieces = [
        "#", "CO", "##VI", "##D", "##19", "cases", "are", "rising", ",", "aren", "'", "t",
        "they", "?", "co", "##vi", "##d",
    ];
    Ok(Vocabulary::build(pieces, spantok::vocab::bert_special_tokens())?.into())
}

fn parse_type(name: &str) -> anyhow::Result<TokenizerType> {
    Ok(serde_json::from_value(serde_json::Value::String(name.to_string()))?)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.verbose {
        println!("{:#?}", args);
    }

    type T = u32;

    let (tokenizer, vocab): (TokenizerKind<T>, Arc<Vocabulary<T>>) = match &args.model_dir {
        Some(root) => {
            let bundle: TokenizerBundle<T> = DirectoryProvider::new(root).load(&args.model_id)?;
            (bundle.tokenizer, bundle.vocab)
        }
        None => {
            let vocab = demo_vocab()?;
            let config = TokenizerConfig::new(parse_type(&args.tokenizer)?)
                .with_lowercase(args.lowercase)
                .with_escape(args.escape);
            if args.verbose {
                println!("{}", config.to_json_string()?);
            }
            (config.build(Some(vocab.clone()))?, vocab)
        }
    };

    println!("tokenizer: {}", tokenizer.name());
    println!("vocab_size: {}", vocab.size());
    println!("text: {:?}", args.text);
    println!();

    let (tokens, offsets) = tokenizer.encode_with_offsets(&args.text, OutputKind::Str)?;
    let ids = tokenizer
        .encode(&args.text, OutputKind::Int)?
        .into_ids()
        .unwrap_or_default();

    let tokens = tokens.into_tokens().unwrap_or_default();
    for ((token, id), offset) in tokens.iter().zip(&ids).zip(&offsets) {
        let Offset { start, end } = *offset;
        println!(
            "{token:>12} {id:>6}  [{start:>3}, {end:>3})  {:?}",
            offset.slice(&args.text)
        );
    }

    println!();
    println!("decoded: {:?}", tokenizer.decode(&tokens)?);

    if args.framed {
        let template = SequenceTemplate::from_vocab(&vocab)?;
        let (framed, framed_offsets) = template.single_with_offsets(&ids, &offsets);
        println!("framed ids: {framed:?}");
        println!(
            "framed offsets: {:?}",
            framed_offsets
                .iter()
                .map(|o| (o.start, o.end))
                .collect::<Vec<_>>()
        );
    }

    Ok(())
}
