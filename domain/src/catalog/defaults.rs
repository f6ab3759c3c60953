//! Built-in tables, overridable from the sources file.

use super::LabelIndex;

const SYMBOLS: &[(&str, &str)] = &[
    // Precious metals
    ("黄金", "GC=F"),
    ("黄金价格", "GC=F"),
    ("gold", "GC=F"),
    ("gold price", "GC=F"),
    ("白银", "SI=F"),
    ("silver", "SI=F"),
    // Currencies
    ("美元指数", "DX-Y.NYB"),
    ("us dollar index", "DX-Y.NYB"),
    ("dxy", "DX-Y.NYB"),
    ("人民币汇率", "CNY=X"),
    ("usdcny", "CNY=X"),
    // Treasuries
    ("美国十年期国债", "^TNX"),
    ("美国十年期国债收益率", "^TNX"),
    ("us 10y treasury", "^TNX"),
    ("10y treasury", "^TNX"),
    ("美国两年期国债", "^IRX"),
    ("us 2y treasury", "^IRX"),
    // Energy
    ("原油", "CL=F"),
    ("原油价格", "CL=F"),
    ("crude oil", "CL=F"),
    ("wti", "CL=F"),
    ("布伦特原油", "BZ=F"),
    ("brent crude", "BZ=F"),
    ("天然气", "NG=F"),
    ("natural gas", "NG=F"),
    // Equity indices
    ("标普500", "^GSPC"),
    ("s&p 500", "^GSPC"),
    ("sp500", "^GSPC"),
    ("纳斯达克", "^IXIC"),
    ("nasdaq", "^IXIC"),
    ("道琼斯", "^DJI"),
    ("dow jones", "^DJI"),
    ("上证指数", "000001.SS"),
    ("上证综指", "000001.SS"),
    ("shanghai composite", "000001.SS"),
    // Crypto
    ("比特币", "BTC-USD"),
    ("bitcoin", "BTC-USD"),
    ("btc", "BTC-USD"),
    ("以太坊", "ETH-USD"),
    ("ethereum", "ETH-USD"),
    ("eth", "ETH-USD"),
    // Base metals and agriculture
    ("铜", "HG=F"),
    ("copper", "HG=F"),
    ("铝", "ALI=F"),
    ("aluminum", "ALI=F"),
    ("大豆", "ZS=F"),
    ("soybeans", "ZS=F"),
    ("玉米", "ZC=F"),
    ("corn", "ZC=F"),
];

const FRED_SERIES: &[(&str, &str)] = &[
    ("美联储利率", "DFF"),
    ("fed funds rate", "DFF"),
    ("federal funds rate", "DFF"),
    ("美国通胀", "CPIAUCSL"),
    ("us cpi", "CPIAUCSL"),
    ("美国失业率", "UNRATE"),
    ("us unemployment rate", "UNRATE"),
    ("美国gdp", "GDP"),
    ("us gdp", "GDP"),
];

/// Label → quote symbol table for the direct quote strategy.
pub fn default_symbols() -> LabelIndex<String> {
    SYMBOLS.iter().map(|(k, v)| (*k, v.to_string())).collect()
}

/// Label → FRED series id table for the structured API strategy.
pub fn default_fred_series() -> LabelIndex<String> {
    FRED_SERIES.iter().map(|(k, v)| (*k, v.to_string())).collect()
}
