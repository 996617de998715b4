mod driver;

use std::io::{self, BufWriter, Write as _};

use anyhow::Context as _;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use parseva_ast::LineBase;
use parseva_errors::Renderer;
use parseva_inputs::File;
use parseva_kinds::names;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Flatten parse trees into simplified syntax trees.
#[derive(Parser)]
#[command(version)]
enum Options {
    /// Flatten raw parse trees (JSON) and print them as tree diagrams.
    Print {
        /// Token definitions in `NAME=VALUE` form.
        #[arg(long)]
        tokens: Utf8PathBuf,
        /// Store 0-based line numbers instead of the parser's 1-based ones.
        #[arg(long)]
        zero_based_lines: bool,
        /// Write to this file instead of stdout.
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
        #[arg(required = true)]
        trees: Vec<Utf8PathBuf>,
    },
    /// List token definitions as `id<TAB>name`.
    Tokens { path: Utf8PathBuf },
    /// Print the canonical token name of structural labels.
    Name {
        #[arg(required = true)]
        labels: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let renderer = Renderer::styled();

    match Options::parse() {
        Options::Print { tokens, zero_based_lines, output, trees } => {
            let registry = driver::load_registry(&renderer, &read(&tokens)?)?;
            let trees = trees
                .iter()
                .map(|path| driver::load_tree(&renderer, &read(path)?))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let line_base = if zero_based_lines { LineBase::ZeroBased } else { LineBase::OneBased };
            let rendered = driver::render_all(&registry, line_base, &trees)?;

            let out: Box<dyn io::Write> = match &output {
                Some(path) => Box::new(
                    std::fs::File::create(path)
                        .with_context(|| format!("failed to create `{path}`"))?,
                ),
                None => Box::new(io::stdout().lock()),
            };
            let mut out = BufWriter::new(out);
            for text in rendered {
                out.write_all(text.as_bytes())?;
            }
            out.flush()?;

            Ok(())
        }
        Options::Tokens { path } => {
            let registry = driver::load_registry(&renderer, &read(&path)?)?;
            io::stdout().lock().write_all(driver::format_tokens(&registry).as_bytes())?;

            Ok(())
        }
        Options::Name { labels } => {
            for label in labels {
                println!("{}", names::canonical_name(&label)?);
            }

            Ok(())
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<File> {
    File::read(path).with_context(|| format!("failed to read `{path}`"))
}
