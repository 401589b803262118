//! Fixed-column text rendering of reports.
//!
//! Every table starts with a blank line, a tab-separated header ending in
//! `Symbol`, and a ruler of eight dashes per column. Each cell is followed by
//! a tab; the symbol label closes the row.

use crate::aggregator::{
    AccessStats, Aggregate, AggregateAccess, AggregateInstr, HotLine, InstrStats, Quartiles,
    Summary, Totals,
};
use crate::analysis::SymbolKey;
use crate::utils::config::UNKNOWN_SYMBOL;

const TOTAL_LABELS: [&str; 4] = [
    "total instructions",
    "total unique ips",
    "total memory accesses",
    "total addresses accessed",
];

const INSTR_HEADERS: [&str; 3] = ["Instrs", "%", "Uniq"];
const MEM_HEADERS: [&str; 6] = ["Mem", "%", "Read", "%", "Write", "%"];
const ADDR_HEADERS: [&str; 6] = ["Addr", "%", "Read", "%", "Write", "%"];

/// One table cell
enum Cell {
    Count(u64),
    Percent(f64),
    Spread(Quartiles, bool),
}

impl Cell {
    fn render(&self, out: &mut String) {
        match self {
            Cell::Count(n) => {
                out.push_str(&format!("{}\t", n));
            }
            Cell::Percent(p) => {
                out.push_str(&format!("{:.2}\t", p));
            }
            Cell::Spread(q, is_percent) => {
                out.push('(');
                for value in [q.lower, q.median, q.upper] {
                    out.push_str(&format_value(value, *is_percent));
                    out.push('\t');
                }
                out.push(')');
            }
        }
    }
}

/// Display label of a symbol key
pub fn symbol_label(symbol: &SymbolKey) -> &str {
    symbol.as_deref().unwrap_or(UNKNOWN_SYMBOL)
}

/// Render a single-run summary
///
/// **Public** - text form of the `summary` command
pub fn render_summary(summary: &Summary) -> String {
    let mut out = render_totals(summary.totals());

    table(
        &mut out,
        &INSTR_HEADERS,
        summary.instr_rows().into_iter().map(instr_row),
    );
    table(
        &mut out,
        &MEM_HEADERS,
        summary.mem_rows().into_iter().map(access_row),
    );
    table(
        &mut out,
        &ADDR_HEADERS,
        summary.addr_rows().into_iter().map(access_row),
    );

    out
}

/// Render a cross-run aggregate
///
/// **Public** - text form of the `aggregate` command
///
/// Counts print as integers when the quartile is integral, percentages
/// always with two decimals.
pub fn render_aggregate(aggregate: &Aggregate) -> String {
    let totals = aggregate.totals();
    let mut out = String::from("\n");
    for (q, label) in [totals.instr, totals.uniq, totals.mem, totals.addr]
        .iter()
        .zip(TOTAL_LABELS)
    {
        out.push_str(&format!(
            "({}, {}, {}) {}\n",
            format_value(q.lower, false),
            format_value(q.median, false),
            format_value(q.upper, false),
            label
        ));
    }

    table(
        &mut out,
        &INSTR_HEADERS,
        aggregate.instr_rows().into_iter().map(aggregate_instr_row),
    );
    table(
        &mut out,
        &MEM_HEADERS,
        aggregate.mem_rows().into_iter().map(aggregate_access_row),
    );
    table(
        &mut out,
        &ADDR_HEADERS,
        aggregate.addr_rows().into_iter().map(aggregate_access_row),
    );

    out
}

/// Render a hot-line listing
///
/// **Public** - text form of the `hotlines` command
///
/// # Arguments
/// * `lines` - Hot lines, hottest first
/// * `base` - Load address subtracted from every instruction address
pub fn render_hot_lines(lines: &[HotLine], base: u64) -> String {
    let mut out = String::new();
    for line in lines {
        let addresses: Vec<String> = line
            .addresses
            .iter()
            .map(|&addr| format!("{:02x}", addr.checked_sub(base).unwrap_or(addr)))
            .collect();
        out.push_str(&format!(
            "{} {} [ {} ]\n",
            line.count,
            line.short_location(),
            addresses.join(" ")
        ));
    }
    out
}

fn render_totals(totals: &Totals) -> String {
    let mut out = String::from("\n");
    for (value, label) in [totals.instr, totals.uniq, totals.mem, totals.addr]
        .iter()
        .zip(TOTAL_LABELS)
    {
        out.push_str(&format!("{} {}\n", value, label));
    }
    out
}

fn table<'r>(
    out: &mut String,
    headers: &[&str],
    rows: impl Iterator<Item = (Vec<Cell>, &'r SymbolKey)>,
) {
    out.push('\n');
    out.push_str(&headers.join("\t"));
    out.push_str("\tSymbol\n");
    out.push_str(&"--------".repeat(headers.len() + 1));
    out.push('\n');

    for (cells, symbol) in rows {
        for cell in &cells {
            cell.render(out);
        }
        out.push_str(symbol_label(symbol));
        out.push('\n');
    }
}

fn instr_row(row: &InstrStats) -> (Vec<Cell>, &SymbolKey) {
    (
        vec![
            Cell::Count(row.instr),
            Cell::Percent(row.percent),
            Cell::Count(row.uniq),
        ],
        &row.symbol,
    )
}

fn access_row(row: &AccessStats) -> (Vec<Cell>, &SymbolKey) {
    (
        vec![
            Cell::Count(row.count),
            Cell::Percent(row.percent),
            Cell::Count(row.read),
            Cell::Percent(row.read_percent),
            Cell::Count(row.write),
            Cell::Percent(row.write_percent),
        ],
        &row.symbol,
    )
}

fn aggregate_instr_row(row: &AggregateInstr) -> (Vec<Cell>, &SymbolKey) {
    (
        vec![
            Cell::Spread(row.instr, false),
            Cell::Spread(row.percent, true),
            Cell::Spread(row.uniq, false),
        ],
        &row.symbol,
    )
}

fn aggregate_access_row(row: &AggregateAccess) -> (Vec<Cell>, &SymbolKey) {
    (
        vec![
            Cell::Spread(row.count, false),
            Cell::Spread(row.percent, true),
            Cell::Spread(row.read, false),
            Cell::Spread(row.read_percent, true),
            Cell::Spread(row.write, false),
            Cell::Spread(row.write_percent, true),
        ],
        &row.symbol,
    )
}

// 25 -> "25", 12.5 -> "12.50"; percentages always get two decimals.
fn format_value(value: f64, is_percent: bool) -> String {
    if !is_percent && value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AccessedAddresses, Analysis, SymbolIps};
    use crate::parser::schema::{Instruction, MicroOp, OpClass};
    use pretty_assertions::assert_eq;

    fn instr(symbol: Option<&str>, address: u64) -> Instruction {
        Instruction {
            tick: 0,
            cpu: "cpu0".to_string(),
            symbol: symbol.map(str::to_string),
            source_line: None,
            offset: None,
            address: Some(address),
            asm: "nop".to_string(),
            micro_ops: Vec::new(),
        }
    }

    fn summary() -> Summary {
        let mut ips = SymbolIps::new();
        let mut acc = AccessedAddresses::new();
        let foo = instr(Some("foo"), 0x10);
        ips.on_instruction(&foo);
        ips.on_instruction(&foo);
        ips.on_instruction(&instr(None, 0x20));
        acc.on_micro_op(
            &foo,
            &MicroOp {
                instruction: "ld".to_string(),
                asm: "ldr".to_string(),
                kind: OpClass::MemRead,
                data: None,
                address: Some(0x100),
            },
        );
        Summary::new(&ips, &acc)
    }

    #[test]
    fn test_render_summary_layout() {
        let text = render_summary(&summary());
        let expected = "\n\
3 total instructions\n\
2 total unique ips\n\
1 total memory accesses\n\
1 total addresses accessed\n\
\n\
Instrs\t%\tUniq\tSymbol\n\
--------------------------------\n\
2\t66.67\t1\tfoo\n\
1\t33.33\t1\t<unknown>\n\
\n\
Mem\t%\tRead\t%\tWrite\t%\tSymbol\n\
--------------------------------------------------------\n\
1\t100.00\t1\t100.00\t0\t0.00\tfoo\n\
0\t0.00\t0\t0.00\t0\t0.00\t<unknown>\n\
\n\
Addr\t%\tRead\t%\tWrite\t%\tSymbol\n\
--------------------------------------------------------\n\
1\t100.00\t1\t100.00\t0\t0.00\tfoo\n\
0\t0.00\t0\t0.00\t0\t0.00\t<unknown>\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_aggregate_cells() {
        let aggregate = Aggregate::new(&[summary(), summary()]).unwrap();
        let text = render_aggregate(&aggregate);

        assert!(text.starts_with("\n(3, 3, 3) total instructions\n"));
        assert!(text.contains("(2\t2\t2\t)(66.67\t66.67\t66.67\t)(1\t1\t1\t)foo\n"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(25.0, false), "25");
        assert_eq!(format_value(12.5, false), "12.50");
        assert_eq!(format_value(50.0, true), "50.00");
    }

    #[test]
    fn test_render_hot_lines_relative_addresses() {
        let lines = vec![
            HotLine {
                line: Some("/usr/src/sys/dtrace.c:412".to_string()),
                count: 7,
                addresses: vec![0x1004, 0x1010],
            },
            HotLine {
                line: None,
                count: 1,
                addresses: vec![0x20],
            },
        ];
        let text = render_hot_lines(&lines, 0x1000);
        assert_eq!(text, "7 /dtrace.c:412 [ 04 10 ]\n1 ?? [ 20 ]\n");
    }
}
