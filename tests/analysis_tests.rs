use exectrace::analysis::{AccessedAddresses, Analysis, SourceLines, SymbolIps};
use exectrace::parser::Parser;
use pretty_assertions::assert_eq;
use std::io::Cursor;

const TRACE: &str = "\
1: cpu0 T0: @reader : ld r1, [r2]
1: cpu0 T0: @reader.0 : ld r1, [r2] : ldr : MemRead :  D=0x1 A=0x100
2: cpu0 T0: @reader : ld r1, [r2]
2: cpu0 T0: @reader.0 : ld r1, [r2] : ldr : MemRead :  D=0x1 A=0x100
3: cpu0 T0: @reader+4 : ld r3, [r4]
3: cpu0 T0: @reader+4.0 : ld r3, [r4] : ldr : MemRead :  D=0x2 A=0x108
4: cpu0 T0: @writer : st r1, [r2]
4: cpu0 T0: @writer.0 : st r1, [r2] : str : MemWrite :  D=0x3 A=0x200
4: cpu0 T0: @writer.1 : st r1, [r2] : add : IntAlu : 
";

fn run() -> (SymbolIps, AccessedAddresses) {
    let mut ips = SymbolIps::new();
    let mut accesses = AccessedAddresses::new();
    let mut parser = Parser::new();
    parser.add_analysis(&mut ips);
    parser.add_analysis(&mut accesses);
    parser.parse_reader(Cursor::new(TRACE)).unwrap();
    drop(parser);
    (ips, accesses)
}

#[test]
fn test_repeated_address_counts_once_as_unique() {
    let (ips, _) = run();
    let reader = Some("reader".to_string());

    assert_eq!(ips.instructions(&reader), 3);
    // @reader and @reader+4 carry no address, so they share the None ip
    assert_eq!(ips.unique_ips(&reader), 1);
    assert_eq!(ips.total(), 4);
}

#[test]
fn test_read_only_symbol_has_no_writes() {
    let (_, accesses) = run();
    let reader = Some("reader".to_string());

    assert_eq!(accesses.num_memory_accesses(&reader), 3);
    assert_eq!(accesses.num_read_accesses(&reader), 3);
    assert_eq!(accesses.num_write_accesses(&reader), 0);
    assert_eq!(accesses.num_addresses(&reader), 2);
    assert_eq!(accesses.num_write_addresses(&reader), 0);
}

#[test]
fn test_non_memory_micro_ops_are_ignored() {
    let (_, accesses) = run();
    let writer = Some("writer".to_string());

    assert_eq!(accesses.num_memory_accesses(&writer), 1);
    assert_eq!(accesses.num_write_accesses(&writer), 1);
    assert_eq!(accesses.num_read_accesses(&writer), 0);
}

#[test]
fn test_unknown_symbol_queries_are_zero() {
    let (ips, accesses) = run();
    let ghost = Some("ghost".to_string());

    assert_eq!(ips.instructions(&ghost), 0);
    assert_eq!(accesses.counts(&ghost).accesses, 0);
}

#[test]
fn test_source_lines_without_table_are_unknown() {
    let mut lines = SourceLines::for_function("reader");
    let mut parser = Parser::new();
    parser.add_analysis(&mut lines);
    parser.parse_reader(Cursor::new(TRACE)).unwrap();
    drop(parser);

    let results = lines.results();
    assert_eq!(results.len(), 1);
    let counts = results.get(&None).unwrap();
    assert_eq!(counts.get(&None), Some(&3));
}
