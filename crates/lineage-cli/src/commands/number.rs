use crate::cli::OutputFormat;
use crate::support::{fail, load_tree_or_exit, parse_params, registry_or_exit, write_output_or_exit};
use lineage_kernel::export::{self, DelimitedOptions, LabelingExport};
use lineage_kernel::{DescendantNumberGenerator, PersonId};
use std::path::PathBuf;

pub struct Args {
    pub ancestor: String,
    pub style: String,
    pub params: Vec<String>,
    pub tree: String,
    pub styles: Option<String>,
    pub format: OutputFormat,
    pub no_header: bool,
    pub delimiter: char,
    pub out: Option<String>,
}

pub fn run(args: Args) {
    let json_output = args.format == OutputFormat::Json;

    let raw = parse_params(&args.params).unwrap_or_else(|e| fail(e, json_output));
    let mut registry = registry_or_exit(args.styles.as_deref(), json_output);
    let style = registry
        .configure(&args.style, &raw)
        .unwrap_or_else(|e| fail(e, json_output));

    let (store, tree_path) = load_tree_or_exit(&args.tree, json_output);
    tracing::debug!(
        tree = %tree_path.display(),
        individuals = store.individual_count(),
        families = store.family_count(),
        "tree loaded"
    );
    let ancestor = PersonId::new(args.ancestor);
    let mut generator = DescendantNumberGenerator::new(&store, &ancestor, style)
        .unwrap_or_else(|e| fail(e, json_output));
    let numbering = generator
        .generate()
        .unwrap_or_else(|e| fail(e, json_output))
        .clone();

    let text = match args.format {
        OutputFormat::Table => export::to_table(&numbering),
        OutputFormat::Csv => export::to_delimited(
            &numbering,
            DelimitedOptions {
                delimiter: args.delimiter,
                header: !args.no_header,
            },
        ),
        OutputFormat::Json => {
            let payload = LabelingExport::new(generator.style(), &ancestor, &numbering);
            let mut text = serde_json::to_string_pretty(&payload).expect("json serialization");
            text.push('\n');
            text
        }
    };

    let Some(out) = args.out else {
        print!("{text}");
        return;
    };
    let out = PathBuf::from(out);
    write_output_or_exit(&out, &text, json_output);

    println!("lineage number {ancestor} --style {}", generator.style().id());
    println!("  Tree: {}", tree_path.display());
    println!("  Entries: {}", numbering.len());
    println!("  Synthetic: {}", numbering.synthetic().count());
    println!("  Output: {}", out.display());
}
