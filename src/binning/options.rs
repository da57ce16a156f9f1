//! The fixed dimension option table.
//!
//! Clients reference options by their index in this table, so the entries
//! and their order are part of the wire contract. New options may only be
//! appended.

use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct};
use serde::{Serialize, Serializer};

/// Family an option applies to, reported as the option's `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionFamily {
    DateTime,
    Number,
    Coordinate,
}

impl OptionFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionFamily::DateTime => "type/DateTime",
            OptionFamily::Number => "type/Number",
            OptionFamily::Coordinate => "type/Coordinate",
        }
    }
}

/// Temporal bucketing granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemporalUnit {
    Minute,
    MinuteOfHour,
    Hour,
    HourOfDay,
    Day,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    Week,
    WeekOfYear,
    Month,
    MonthOfYear,
    Quarter,
    QuarterOfYear,
    Year,
}

impl TemporalUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalUnit::Minute => "minute",
            TemporalUnit::MinuteOfHour => "minute-of-hour",
            TemporalUnit::Hour => "hour",
            TemporalUnit::HourOfDay => "hour-of-day",
            TemporalUnit::Day => "day",
            TemporalUnit::DayOfWeek => "day-of-week",
            TemporalUnit::DayOfMonth => "day-of-month",
            TemporalUnit::DayOfYear => "day-of-year",
            TemporalUnit::Week => "week",
            TemporalUnit::WeekOfYear => "week-of-year",
            TemporalUnit::Month => "month",
            TemporalUnit::MonthOfYear => "month-of-year",
            TemporalUnit::Quarter => "quarter",
            TemporalUnit::QuarterOfYear => "quarter-of-year",
            TemporalUnit::Year => "year",
        }
    }
}

/// How a numeric field is grouped into buckets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinningStrategy {
    /// Let the query processor pick a bucket count.
    Default,
    /// A target number of buckets.
    NumBins(u32),
    /// Fixed-width buckets.
    BinWidth(f64),
}

impl BinningStrategy {
    /// Strategy identifier as used in queries.
    pub fn id(&self) -> &'static str {
        match self {
            BinningStrategy::Default => "default",
            BinningStrategy::NumBins(_) => "num-bins",
            BinningStrategy::BinWidth(_) => "bin-width",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionKind {
    Temporal(TemporalUnit),
    Binning(BinningStrategy),
}

/// One entry of the option table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionOption {
    pub name: &'static str,
    pub kind: OptionKind,
    pub family: OptionFamily,
}

impl DimensionOption {
    const fn temporal(name: &'static str, unit: TemporalUnit) -> Self {
        Self {
            name,
            kind: OptionKind::Temporal(unit),
            family: OptionFamily::DateTime,
        }
    }

    const fn binning(name: &'static str, strategy: BinningStrategy, family: OptionFamily) -> Self {
        Self {
            name,
            kind: OptionKind::Binning(strategy),
            family,
        }
    }

    /// Binning strategy id, for numeric and coordinate options.
    pub fn strategy_id(&self) -> Option<&'static str> {
        match self.kind {
            OptionKind::Binning(strategy) => Some(strategy.id()),
            OptionKind::Temporal(_) => None,
        }
    }
}

use BinningStrategy as B;
use OptionFamily::{Coordinate, Number};
use TemporalUnit as T;

/// All dimension options, indexed by position.
pub static DIMENSION_OPTIONS: [DimensionOption; 24] = [
    DimensionOption::temporal("Minute", T::Minute),
    DimensionOption::temporal("Minute of Hour", T::MinuteOfHour),
    DimensionOption::temporal("Hour", T::Hour),
    DimensionOption::temporal("Hour of Day", T::HourOfDay),
    DimensionOption::temporal("Day", T::Day),
    DimensionOption::temporal("Day of Week", T::DayOfWeek),
    DimensionOption::temporal("Day of Month", T::DayOfMonth),
    DimensionOption::temporal("Day of Year", T::DayOfYear),
    DimensionOption::temporal("Week", T::Week),
    DimensionOption::temporal("Week of Year", T::WeekOfYear),
    DimensionOption::temporal("Month", T::Month),
    DimensionOption::temporal("Month of Year", T::MonthOfYear),
    DimensionOption::temporal("Quarter", T::Quarter),
    DimensionOption::temporal("Quarter of Year", T::QuarterOfYear),
    DimensionOption::temporal("Year", T::Year),
    DimensionOption::binning("Auto bin", B::Default, Number),
    DimensionOption::binning("10 bins", B::NumBins(10), Number),
    DimensionOption::binning("50 bins", B::NumBins(50), Number),
    DimensionOption::binning("100 bins", B::NumBins(100), Number),
    DimensionOption::binning("Auto bin", B::Default, Coordinate),
    DimensionOption::binning("Bin every 0.1 degrees", B::BinWidth(0.1), Coordinate),
    DimensionOption::binning("Bin every 1 degree", B::BinWidth(1.0), Coordinate),
    DimensionOption::binning("Bin every 10 degrees", B::BinWidth(10.0), Coordinate),
    DimensionOption::binning("Bin every 20 degrees", B::BinWidth(20.0), Coordinate),
];

/// Default option for temporal fields: "Day".
pub const DEFAULT_TEMPORAL_OPTION: usize = 4;
/// Default option for plain numeric fields: "Auto bin".
pub const DEFAULT_NUMERIC_OPTION: usize = 15;
/// Default option for coordinate fields: "Auto bin".
pub const DEFAULT_COORDINATE_OPTION: usize = 19;

/// Look up an option by its string index.
pub fn option_at(index: &str) -> Option<&'static DimensionOption> {
    index.parse::<usize>().ok().and_then(|i| DIMENSION_OPTIONS.get(i))
}

/// `mbql` clause of an option: the query fragment a client sends back.
struct Mbql<'a>(&'a OptionKind);

impl Serialize for Mbql<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            OptionKind::Temporal(unit) => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element("datetime-field")?;
                seq.serialize_element(&())?;
                seq.serialize_element(unit.as_str())?;
                seq.end()
            }
            OptionKind::Binning(strategy) => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                seq.serialize_element("binning-strategy")?;
                seq.serialize_element(&())?;
                seq.serialize_element(strategy.id())?;
                match strategy {
                    BinningStrategy::Default => seq.serialize_element(&())?,
                    BinningStrategy::NumBins(n) => seq.serialize_element(n)?,
                    BinningStrategy::BinWidth(w) => seq.serialize_element(w)?,
                }
                seq.end()
            }
        }
    }
}

impl Serialize for DimensionOption {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("DimensionOption", 3)?;
        s.serialize_field("name", self.name)?;
        s.serialize_field("mbql", &Mbql(&self.kind))?;
        s.serialize_field("type", self.family.as_str())?;
        s.end()
    }
}

/// The full option table as sent to clients: string index → option,
/// emitted in ascending numeric index order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionOptionsTable;

impl Serialize for DimensionOptionsTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DIMENSION_OPTIONS.len()))?;
        for (index, option) in DIMENSION_OPTIONS.iter().enumerate() {
            map.serialize_entry(&index.to_string(), option)?;
        }
        map.end()
    }
}
