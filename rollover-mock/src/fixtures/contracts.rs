use chrono::NaiveDate;
use rollover_core::{Contract, ContractSymbol, Decimal, RootSymbol};

// (id, symbol, listed, last traded)
const ROWS: &[(u64, &str, &str, &str)] = &[
    (1, "IF1906", "2019-01-02", "2019-06-21"),
    (2, "IF1909", "2019-04-01", "2019-09-20"),
    (3, "IF1912", "2019-07-01", "2019-12-20"),
    (4, "IC1906", "2019-01-02", "2019-06-21"),
];

pub fn all() -> Vec<Contract> {
    ROWS.iter().filter_map(|row| build(*row)).collect()
}

pub fn by_symbol(s: &ContractSymbol) -> Option<Contract> {
    all().into_iter().find(|c| &c.symbol == s)
}

pub fn by_id(id: u64) -> Option<Contract> {
    all().into_iter().find(|c| c.id == id)
}

pub fn by_root(root: &RootSymbol) -> Vec<Contract> {
    all().into_iter().filter(|c| &c.root == root).collect()
}

fn build((id, sym, listed, last): (u64, &str, &str, &str)) -> Option<Contract> {
    let symbol = ContractSymbol::parse(sym).ok()?;
    let root = symbol.root();
    let multiplier = match root.as_str() {
        "IC" => Decimal::from(200),
        _ => Decimal::from(300),
    };
    Some(Contract {
        id,
        symbol,
        root,
        multiplier,
        tick_size: Decimal::new(2, 1),
        listed: Some(date(listed)?),
        last_traded: date(last)?,
    })
}

pub fn date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
