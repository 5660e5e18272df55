use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use std::path::Path;
use fxp_lms::snapshot::{decode_state, read_bytes, read_header};
use fxp_lms::verify::{model_state_hash, to_hex};
use fxp_lms::ModelState;

pub fn run(snapshot_path: &Path) -> anyhow::Result<()> {
    let bytes = read_bytes(snapshot_path)?;
    let header = read_header(&bytes)?;

    println!("\nModel Snapshot Report");
    println!("---------------------");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Raw", "Value"]);

    table.add_row(vec!["Schema".to_string(), header.schema_version.to_string(), String::new()]);
    table.add_row(vec!["Format".to_string(), String::new(), header.format.to_string()]);
    table.add_row(vec!["Features".to_string(), String::new(), header.n_features.to_string()]);
    table.add_row(vec!["Version".to_string(), String::new(), header.version.to_string()]);

    dispatch_features!(header.n_features, add_parameters(&bytes, &mut table))?;

    println!("{table}\n");
    Ok(())
}

fn add_parameters<const N: usize>(bytes: &[u8], table: &mut Table) -> anyhow::Result<()> {
    let model: ModelState<N> = decode_state(bytes)?;
    let fmt = model.format();
    let hp = model.hyperparams();

    let mut row = |name: String, raw: i32| {
        table.add_row(vec![name, raw.to_string(), format!("{:.6}", fmt.decode(raw.into()))]);
    };
    row("eta".to_string(), hp.eta.0);
    row("lambda".to_string(), hp.lambda.0);
    row("bias".to_string(), model.bias().0);
    for (i, w) in model.weights().iter().enumerate() {
        row(format!("w[{i}]"), w.0);
    }

    table.add_row(vec![
        "State Hash".to_string(),
        String::new(),
        to_hex(&model_state_hash(&model)),
    ]);
    Ok(())
}
