use foundation::time::{AgeSpan, AgeWindow};
use scene::{DataStore, SelectionSet};

pub struct TemporalAnalysis;

impl TemporalAnalysis {
    /// `[max start, min end]` over `spans`, `None` when empty.
    pub fn extent(spans: impl IntoIterator<Item = AgeSpan>) -> Option<AgeWindow> {
        let mut iter = spans.into_iter();
        let first = iter.next()?;
        let (max, min) = iter.fold((first.start, first.end), |(max, min), s| {
            (max.max(s.start), min.min(s.end))
        });
        Some(AgeWindow::new(max, min))
    }

    pub fn subset_extent(store: &DataStore, subset: &SelectionSet) -> Option<AgeWindow> {
        Self::extent(store.resolve(subset).map(|(_, occ)| occ.age))
    }
}
