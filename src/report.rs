/// Console summary of an analysis run
///
/// Prints the classification table, hot spot totals, and the strongest cells
/// by z-score. Everything here reads the immutable ResultSet; there is no
/// state carried between calls.
use crate::classify::SignificanceClass;
use crate::result_set::ResultSet;
use colored::Colorize;

/// Paint a class label in roughly its map color for terminal output
fn colored_label(class: SignificanceClass) -> colored::ColoredString {
    match class {
        SignificanceClass::HotSpot99 => class.label().red().bold(),
        SignificanceClass::HotSpot95 => class.label().red(),
        SignificanceClass::HotSpot90 => class.label().yellow(),
        SignificanceClass::NotSignificant => class.label().dimmed(),
        SignificanceClass::ColdSpot90 => class.label().cyan(),
        SignificanceClass::ColdSpot95 => class.label().blue(),
        SignificanceClass::ColdSpot99 => class.label().blue().bold(),
    }
}

/// Print the per-class classification summary table
pub fn print_classification_summary(results: &ResultSet) {
    let total = results.len();
    println!("\n📊 Gi* Classification Summary");
    println!("   {:<22}  {:>7}  {:>10}", "Class", "Cells", "% of total");
    println!("   {}", "-".repeat(43));
    for (class, count) in results.class_counts() {
        if count == 0 {
            continue;
        }
        let pct = 100.0 * count as f64 / total as f64;
        println!(
            "   {:<22}  {:>7}  {:>9.1}%",
            colored_label(class),
            count,
            pct
        );
    }

    println!(
        "\n   Events in 99% Hot Spots: {}",
        results.events_in_class(SignificanceClass::HotSpot99)
    );
    println!(
        "   Events in 95% Hot Spots: {}",
        results.events_in_class(SignificanceClass::HotSpot95)
    );
    if let Some((min_z, max_z)) = results.z_extrema() {
        println!("   Max Gi* z-score        : {:.3}", max_z);
        println!("   Min Gi* z-score        : {:.3}", min_z);
    }
    if results.degenerate_count() > 0 {
        println!(
            "   ⚠️  Cells with no neighbor in band: {}",
            results.degenerate_count()
        );
    }
}

/// Print the strongest cells by z-score
pub fn print_top_cells(results: &ResultSet, n: usize) {
    let top = results.top_by_z(n);
    if top.is_empty() {
        return;
    }
    println!("\n   Top-{} cells by Gi* z-score:", top.len());
    for record in top {
        println!(
            "     z={:>7.3}  p={:.4}  count={:>4}  cell ({}, {})",
            record.z, record.p, record.count, record.row, record.col
        );
    }
}

/// Full report: classification table, top cells, and run totals
pub fn print_report(results: &ResultSet) {
    print_classification_summary(results);
    print_top_cells(results, 5);

    let sig_hot = results
        .iter()
        .filter(|r| r.class.is_hot() && r.p < 0.05)
        .count();
    let sig_cold = results
        .iter()
        .filter(|r| r.class.is_cold() && r.p < 0.05)
        .count();
    println!("\n   Total cells analysed : {}", results.len());
    println!("   Total events         : {}", results.total_events());
    println!("   Sig. hot  (p<0.05)   : {}", sig_hot);
    println!("   Sig. cold (p<0.05)   : {}", sig_cold);
}
