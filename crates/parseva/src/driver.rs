use std::num::NonZeroUsize;
use std::thread;

use anyhow::anyhow;
use parseva_ast::{Flattener, LineBase};
use parseva_cst::RawNode;
use parseva_errors::{Diagnostic, Renderer};
use parseva_inputs::File;
use parseva_kinds::{Error, Registry, TokenTable};

pub(crate) fn load_registry(renderer: &Renderer, file: &File) -> anyhow::Result<Registry> {
    let table = parse_table(file).map_err(|diagnostic| {
        report(renderer, file, &diagnostic);
        anyhow!("could not read token definitions from `{}`", file.path())
    })?;

    Ok(Registry::build(&table)?)
}

pub(crate) fn load_tree(renderer: &Renderer, file: &File) -> anyhow::Result<RawNode> {
    parse_tree(file).map_err(|diagnostic| {
        report(renderer, file, &diagnostic);
        anyhow!("could not read a parse tree from `{}`", file.path())
    })
}

/// Flattens and renders `trees` on at most one thread per available core.
///
/// Output comes back in input order regardless of which thread finishes
/// first. The first failing tree, in input order, fails the whole batch.
pub(crate) fn render_all(
    registry: &Registry,
    line_base: LineBase,
    trees: &[RawNode],
) -> Result<Vec<String>, Error> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    render_on(workers, registry, line_base, trees)
}

/// Splits `trees` into one contiguous chunk per worker. Each worker reuses a
/// single flattener, so labels shared between its trees are resolved once.
fn render_on(
    workers: usize,
    registry: &Registry,
    line_base: LineBase,
    trees: &[RawNode],
) -> Result<Vec<String>, Error> {
    if trees.is_empty() {
        return Ok(Vec::new());
    }
    let chunk_size = trees.len().div_ceil(workers.max(1));

    thread::scope(|scope| {
        let handles = trees
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    let mut flattener = Flattener::new(registry).line_base(line_base);
                    chunk
                        .iter()
                        .map(|raw| flattener.flatten(raw).map(|tree| tree.to_string()))
                        .collect::<Result<Vec<_>, Error>>()
                })
            })
            .collect::<Vec<_>>();

        let mut rendered = Vec::with_capacity(trees.len());
        for handle in handles {
            let chunk = handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
            rendered.extend(chunk);
        }
        Ok(rendered)
    })
}

/// The registry as `id<TAB>name` lines in ascending id order.
pub(crate) fn format_tokens(registry: &Registry) -> String {
    registry.kinds().map(|(kind, name)| format!("{kind}\t{name}\n")).collect()
}

fn parse_table(file: &File) -> Result<TokenTable, Diagnostic> {
    TokenTable::parse(file.text()).map_err(|err| Diagnostic::error(err.message, err.range))
}

fn parse_tree(file: &File) -> Result<RawNode, Diagnostic> {
    RawNode::from_json(file.text()).map_err(|err| {
        let range = file.char_range(err.line(), err.column());
        Diagnostic::error(err.to_string(), range)
    })
}

fn report(renderer: &Renderer, file: &File, diagnostic: &Diagnostic) {
    eprintln!("{}", diagnostic.render(renderer, file.path().as_str(), file.text()));
}
