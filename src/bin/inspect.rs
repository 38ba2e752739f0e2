//! atlasbuf Inspect Tool
//!
//! Decodes a variable-length byte array list from a file and prints a
//! summary of its records.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use atlasbuf::{
    AtlasError, Buffer, ByteArrayIndexedList, Config, FileBuffer, MemoryBuffer, Result,
    VariableLengthByteArrayIndexedList, Verification,
};

/// atlasbuf inspect
#[derive(Parser, Debug)]
#[command(name = "atlasbuf-inspect")]
#[command(about = "Inspect a variable-length byte array list stored in a file")]
#[command(version)]
struct Args {
    /// File containing the encoded list
    path: String,

    /// Byte offset of the list within the file
    #[arg(short, long, default_value = "0")]
    offset: u64,

    /// Encoded length of the list; defaults to the rest of the file.
    /// Full verification needs the view to end where the list ends.
    #[arg(long)]
    length: Option<u64>,

    /// Offset table checking: trusted or full
    #[arg(short, long, default_value = "full")]
    verification: Verification,

    /// Memory-map the file instead of issuing positioned reads
    #[arg(long)]
    mmap: bool,

    /// Print at most this many records
    #[arg(short, long, default_value = "32")]
    limit: usize,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,atlasbuf=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("atlasbuf inspect v{}", atlasbuf::VERSION);
    tracing::info!("File: {} (list at offset {})", args.path, args.offset);

    let config = Config::builder().verification(args.verification).build();

    let outcome = if args.mmap {
        std::fs::File::open(&args.path)
            .map_err(AtlasError::from)
            .and_then(|file| MemoryBuffer::map_file(&file))
            .and_then(|buf| inspect(buf, &args, &config))
    } else {
        FileBuffer::open(&args.path).and_then(|buf| inspect(buf, &args, &config))
    };

    if let Err(e) = outcome {
        tracing::error!("Inspection failed: {}", e);
        std::process::exit(1);
    }
}

fn inspect<B: Buffer>(root: B, args: &Args, config: &Config) -> Result<()> {
    let length = args
        .length
        .unwrap_or_else(|| root.limit().saturating_sub(args.offset));
    let mut buf = root.slice(args.offset, length)?;
    let list = VariableLengthByteArrayIndexedList::decode_with_config(&mut buf, config)?;

    println!("elements:     {}", list.size());
    println!("encoded size: {} bytes", list.encoded_len()?);

    for (i, record) in list.iter().take(args.limit).enumerate() {
        let bytes = record?.to_vec()?;
        println!(
            "[{:>6}] len={:<8} crc32={:08x}",
            i,
            bytes.len(),
            crc32fast::hash(&bytes)
        );
    }

    if list.size() > args.limit {
        println!("... {} more", list.size() - args.limit);
    }

    Ok(())
}
