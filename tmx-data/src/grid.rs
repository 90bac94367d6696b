use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tmx_core::month::{DayReading, MonthCell, MonthKey, MONTHS_PER_YEAR};

/// The dense year x month matrix of aggregated cells.
///
/// Every `(year, month)` pair in `years x 1..=12` has exactly one cell, in
/// year-major, month-minor order. Built once per load and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    /// Ascending.
    pub years: Vec<i32>,
    /// Always 1..=12.
    pub months: Vec<u32>,
    cells: Vec<MonthCell>,
    #[serde(skip)]
    columns: HashMap<i32, usize>,
}

impl Grid {
    /// A grid with no years and no cells.
    pub fn empty() -> Grid {
        Grid::from_groups(Vec::new(), BTreeMap::new())
    }

    /// Fill the product `years x 1..=12`, taking each month's readings from
    /// `groups` and emitting a placeholder where a month has none.
    ///
    /// `years` must be ascending and distinct. Groups for other years are
    /// ignored.
    pub fn from_groups(years: Vec<i32>, mut groups: BTreeMap<MonthKey, Vec<DayReading>>) -> Grid {
        let mut cells = Vec::with_capacity(years.len() * MONTHS_PER_YEAR as usize);
        for &year in &years {
            for key in MonthKey::months_of(year) {
                let days = groups.remove(&key).unwrap_or_default();
                cells.push(MonthCell::from_days(key, days));
            }
        }
        if !groups.is_empty() {
            log::debug!("grid: dropped {} month groups outside the year window", groups.len());
        }
        let columns = years
            .iter()
            .enumerate()
            .map(|(column, &year)| (year, column))
            .collect();
        Grid {
            years,
            months: (1..=MONTHS_PER_YEAR).collect(),
            cells,
            columns,
        }
    }

    /// Cell for a (year, month) pair, if the year is in the grid.
    pub fn get(&self, key: MonthKey) -> Option<&MonthCell> {
        self.index_of(key).and_then(|index| self.cells.get(index))
    }

    /// Position of a (year, month) pair within [`Grid::cells`].
    pub fn index_of(&self, key: MonthKey) -> Option<usize> {
        let column = self.column(key.year)?;
        if !(1..=MONTHS_PER_YEAR).contains(&key.month) {
            return None;
        }
        Some(column * MONTHS_PER_YEAR as usize + (key.month - 1) as usize)
    }

    /// Position of a year along the horizontal axis.
    pub fn column(&self, year: i32) -> Option<usize> {
        self.columns.get(&year).copied()
    }

    /// All cells, year-major then month.
    pub fn cells(&self) -> &[MonthCell] {
        &self.cells
    }

    /// True when the grid has no years (empty input).
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.missing).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tmx_core::month::{DayReading, MonthKey};

    fn day(year: i32, month: u32, day: u32) -> DayReading {
        DayReading {
            day,
            date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
            tmax: 25.0,
            tmin: 15.0,
        }
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::empty();
        assert!(grid.is_empty());
        assert!(grid.cells().is_empty());
        assert_eq!(grid.months, (1..=12).collect::<Vec<u32>>());
        assert!(grid.get(MonthKey::new(2020, 1).unwrap()).is_none());
    }

    #[test]
    fn test_lookup_by_key() {
        let mut groups = BTreeMap::new();
        groups.insert(MonthKey::new(2019, 6).unwrap(), vec![day(2019, 6, 2)]);
        groups.insert(MonthKey::new(2021, 11).unwrap(), vec![day(2021, 11, 30)]);
        let grid = Grid::from_groups(vec![2019, 2021], groups);

        assert_eq!(grid.cells().len(), 24);
        assert_eq!(grid.column(2019), Some(0));
        assert_eq!(grid.column(2021), Some(1));
        assert_eq!(grid.column(2020), None);

        let june = grid.get(MonthKey::new(2019, 6).unwrap()).unwrap();
        assert!(!june.missing);
        assert_eq!((june.year, june.month), (2019, 6));
        let november = grid.get(MonthKey::new(2021, 11).unwrap()).unwrap();
        assert_eq!(november.days[0].day, 30);
        assert!(grid.get(MonthKey::new(2021, 12).unwrap()).unwrap().missing);
        assert_eq!(grid.missing_count(), 22);
        assert_eq!(grid.index_of(MonthKey::new(2021, 11).unwrap()), Some(22));
        assert_eq!(grid.index_of(MonthKey { year: 2019, month: 13 }), None);
    }

    #[test]
    fn test_groups_outside_years_are_dropped() {
        let mut groups = BTreeMap::new();
        groups.insert(MonthKey::new(2000, 1).unwrap(), vec![day(2000, 1, 1)]);
        let grid = Grid::from_groups(vec![2001], groups);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.missing_count(), 12);
        assert!(grid.get(MonthKey::new(2000, 1).unwrap()).is_none());
    }

    #[test]
    fn test_serializes_missing_extrema_as_null() {
        let grid = Grid::from_groups(vec![2022], BTreeMap::new());
        let json = serde_json::to_value(&grid).unwrap();
        assert_eq!(json["years"][0], 2022);
        assert_eq!(json["cells"].as_array().unwrap().len(), 12);
        assert!(json["cells"][0]["monthly_max"].is_null());
        assert_eq!(json["cells"][0]["missing"], true);
        assert!(json.get("columns").is_none());
    }
}
