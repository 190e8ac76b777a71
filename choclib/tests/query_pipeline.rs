//! End-to-end pipeline tests: command string -> request -> plan ->
//! execution -> rendered lines, over a fixed 10-row fixture.

use choclib::{
    execute, parse_command, render_rows, AggValue, QueryPlan, ResultRow, Store,
};

const BARS_CSV: &str = "\
Company,SpecificBeanBarName,REF,ReviewDate,CocoaPercent,CompanyLocation,Rating,BeanType,BroadBeanOrigin
Soma,Madagascar,101,2014,70%,Canada,4,Trinitario,Madagascar
Soma,Chuao,102,2014,70%,Canada,4,Criollo,Venezuela
Soma,Porcelana,103,2015,70%,Canada,3.75,Criollo,Venezuela
Soma,Guasare,104,2015,70%,Canada,4.25,Criollo,Venezuela
Soma,Arcana,105,2016,70%,Canada,3.5,Trinitario,Venezuela
Pralus,Madagascar,201,2012,75%,France,3.5,Criollo,Madagascar
Pralus,Ghana,202,2012,75%,France,3.25,Forastero,Ghana
Pralus,Indonesie,203,2013,75%,France,3.5,Trinitario,Indonesia
Pralus,Tanzanie,204,2013,75%,France,3.25,Forastero,Tanzania
Pralus,Venezuela,205,2014,75%,France,3.75,Criollo,Venezuela
";

const COUNTRIES_JSON: &str = r#"[
    {"alpha2Code": "CA", "alpha3Code": "CAN", "name": "Canada",
     "region": "Americas", "subregion": "Northern America",
     "population": 36155487, "area": 9984670.0},
    {"alpha2Code": "FR", "alpha3Code": "FRA", "name": "France",
     "region": "Europe", "subregion": "Western Europe",
     "population": 66710000, "area": 640679.0},
    {"alpha2Code": "MG", "alpha3Code": "MDG", "name": "Madagascar",
     "region": "Africa", "subregion": "Eastern Africa",
     "population": 24430325, "area": 587041.0},
    {"alpha2Code": "VE", "alpha3Code": "VEN", "name": "Venezuela",
     "region": "Americas", "subregion": "South America",
     "population": 31028700, "area": 916445.0}
]"#;

fn fixture_store() -> Store {
    use std::io::Write;

    let mut bars_file = tempfile::NamedTempFile::new().unwrap();
    bars_file.write_all(BARS_CSV.as_bytes()).unwrap();
    let mut countries_file = tempfile::NamedTempFile::new().unwrap();
    countries_file.write_all(COUNTRIES_JSON.as_bytes()).unwrap();

    choclib::load_store(bars_file.path(), countries_file.path()).unwrap()
}

fn run(store: &Store, command: &str) -> (QueryPlan, Vec<ResultRow>) {
    let request = parse_command(command);
    let plan = QueryPlan::from_request(&request).expect("command names a query kind");
    let rows = execute(store, &plan).expect("query executes");
    (plan, rows)
}

#[test]
fn companies_cocoa_top5_orders_by_average_cocoa() {
    let store = fixture_store();
    let (_, rows) = run(&store, "companies cocoa top=5");

    // Both companies have 5 bars (> 4), Pralus averages 0.75 vs Soma's 0.70
    assert_eq!(rows.len(), 2);
    match &rows[0] {
        ResultRow::Group(g) => {
            assert_eq!(g.label, "Pralus");
            match g.value {
                AggValue::Cocoa(v) => assert!((v - 0.75).abs() < 1e-9),
                _ => panic!("expected cocoa aggregate"),
            }
        }
        ResultRow::Bar(_) => panic!("expected group rows"),
    }
}

#[test]
fn result_size_bounded_by_limit() {
    let store = fixture_store();

    let (_, rows) = run(&store, "bars");
    assert!(rows.len() <= 10);

    let (_, rows) = run(&store, "bars top=3");
    assert_eq!(rows.len(), 3);
}

#[test]
fn missing_query_type_yields_no_plan() {
    let request = parse_command("cocoa top=5 sellers");
    assert!(QueryPlan::from_request(&request).is_none());
}

#[test]
fn country_filter_case_insensitive_equivalence() {
    let store = fixture_store();
    let (_, lower) = run(&store, "bars sellcountry=ca top=20");
    let (_, upper) = run(&store, "bars sellcountry=CA top=20");
    assert_eq!(lower, upper);
    assert_eq!(lower.len(), 5);
}

#[test]
fn rendered_lines_match_fixed_width_layout() {
    let store = fixture_store();
    let (plan, rows) = run(&store, "bars ratings top=1");
    let lines = render_rows(&plan, &rows);

    assert_eq!(lines.len(), 1);
    // Guasare is the highest-rated bar in the fixture
    assert!(lines[0].starts_with(&format!("{:<20}", "Guasare")));
    assert!(lines[0].contains("4.2"));
    assert!(lines[0].contains("70%"));
    assert_eq!(lines[0].chars().count(), 120);
}

#[test]
fn regions_query_renders_narrow_fields() {
    let store = fixture_store();
    let (plan, rows) = run(&store, "regions bars_sold top=5");
    let lines = render_rows(&plan, &rows);

    // Sellers role: Canada -> Americas (5 bars), France -> Europe (5 bars)
    assert_eq!(lines.len(), 2);
    for line in &lines {
        assert_eq!(line.chars().count(), 30);
    }
}

#[test]
fn sources_role_changes_grouping() {
    let store = fixture_store();
    let (_, rows) = run(&store, "countries sources bars_sold top=5");

    // Venezuela is the only origin with more than 4 resolved bars
    assert_eq!(rows.len(), 1);
    match &rows[0] {
        ResultRow::Group(g) => {
            assert_eq!(g.label, "Venezuela");
            assert_eq!(g.value, AggValue::Count(5));
        }
        ResultRow::Bar(_) => panic!("expected group rows"),
    }
}
