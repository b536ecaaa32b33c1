use crate::cli::ElectronsArgs;
use crate::error::Result;
use mofdock::core::electrons::{ElectronRecord, PopulationAnalysis};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ElectronsArgs) -> Result<()> {
    info!("Loading population analysis from {:?}", &args.input);
    let analysis = PopulationAnalysis::load(&args.input)?;
    let records = analysis.electron_records()?;
    info!("Derived electron records for {} atom(s).", records.len());

    print!("{}", render_table(&records));
    Ok(())
}

fn render_table(records: &BTreeMap<usize, ElectronRecord>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6}  {:<4} {:>10} {:>10} {:>10} {:>10}",
        "Atom", "El", "Charge", "Available", "Bonding", "Free"
    );
    for (index, record) in records {
        let _ = writeln!(
            out,
            "{:>6}  {:<4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            index,
            record.element,
            record.partial_charge,
            record.available_electrons,
            record.bonding_electrons,
            record.free_electrons
        );
    }
    out
}
