use ecc240_codec::{EccProfile, RunInverseTable};
use ecc240_core::ProfileKind;

const ENTRIES_PER_ROW: usize = 16;

/// Prints both reduction tables of a profile, 16 hex entries per row
pub fn print_tables(params: &EccProfile) {
    println!("profile {} poly {:#07x}", params.kind, params.poly);
    print_table("lo", params.reduce.lo());
    print_table("hi", params.reduce.hi());

    if params.kind == ProfileKind::Fixed240 {
        let table = RunInverseTable::fixed240();
        println!("run-inverse: {} correctable syndromes", table.populated());
    }
}

fn print_table(name: &str, table: &[u16; 256]) {
    println!("{}:", name);
    for (row, chunk) in table.chunks(ENTRIES_PER_ROW).enumerate() {
        let cells: Vec<String> = chunk.iter().map(|e| format!("{:04x}", e)).collect();
        println!("  {:02x}: {}", row * ENTRIES_PER_ROW, cells.join(" "));
    }
}
