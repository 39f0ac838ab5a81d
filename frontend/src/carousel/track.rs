/// Geometry of a carousel track: how many items, how wide each one is and
/// how much of the track fits in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub item_count: usize,
    pub item_extent: f64,
    pub visible_extent: f64,
}

impl Track {
    pub fn new(item_count: usize, item_extent: f64, visible_extent: f64) -> Self {
        Self {
            item_count,
            item_extent,
            visible_extent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }

    pub fn total_extent(&self) -> f64 {
        self.item_count as f64 * self.item_extent
    }

    pub fn max_offset(&self) -> f64 {
        (self.total_extent() - self.visible_extent).max(0.0)
    }

    /// Number of distinct settle positions. Once the window shows the last
    /// card there is nowhere further to scroll, so cards that start inside
    /// the final window do not get a stop of their own.
    pub fn stop_count(&self) -> usize {
        if self.item_count == 0 {
            return 0;
        }
        if !(self.item_extent.is_finite() && self.item_extent > 0.0) {
            return self.item_count;
        }
        // the epsilon keeps float noise from inventing a stop past max
        let last_stop = (self.max_offset() / self.item_extent - 1e-9).ceil().max(0.0);
        (last_stop as usize).saturating_add(1).min(self.item_count)
    }

    /// Settle offset for stop `index`. The last stop sits at `max_offset`.
    pub fn offset_for(&self, index: usize) -> f64 {
        (index as f64 * self.item_extent)
            .min(self.max_offset())
            .max(0.0)
    }

    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.stop_count().saturating_sub(1))
    }

    /// Moves `index` by `step` around the ring of stops.
    pub fn wrap(&self, index: usize, step: isize) -> usize {
        let stops = self.stop_count();
        if stops == 0 {
            return 0;
        }
        let n = stops as isize;
        (index as isize + step).rem_euclid(n) as usize
    }

    /// Signed shortest distance from `from` to `to` around the ring.
    /// Ties resolve to the positive side.
    pub fn cyclic_distance(&self, from: usize, to: usize) -> isize {
        if self.item_count == 0 {
            return 0;
        }
        let n = self.item_count as isize;
        let forward = (to as isize - from as isize).rem_euclid(n);
        if forward * 2 > n {
            forward - n
        } else {
            forward
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_stop_at_max() {
        let track = Track::new(4, 300.0, 900.0);
        assert_eq!(track.max_offset(), 300.0);
        assert_eq!(track.stop_count(), 2);
        assert_eq!(track.offset_for(0), 0.0);
        assert_eq!(track.offset_for(1), 300.0);
    }

    #[test]
    fn last_stop_lands_exactly_on_max() {
        let tech = Track::new(8, 180.0, 900.0);
        assert_eq!(tech.max_offset(), 540.0);
        assert_eq!(tech.stop_count(), 4);
        assert_eq!(tech.offset_for(3), 540.0);
        assert_eq!(tech.wrap(3, 1), 0);

        // a partial final step still gets its own stop
        let ragged = Track::new(5, 300.0, 1000.0);
        assert_eq!(ragged.max_offset(), 500.0);
        assert_eq!(ragged.stop_count(), 3);
        assert_eq!(ragged.offset_for(2), 500.0);
    }

    #[test]
    fn one_card_per_window_gives_a_stop_per_card() {
        let track = Track::new(5, 420.0, 420.0);
        assert_eq!(track.stop_count(), 5);
        assert_eq!(track.clamp_index(9), 4);
    }

    #[test]
    fn bad_extent_never_divides_by_zero() {
        let track = Track::new(3, 0.0, 900.0);
        assert_eq!(track.stop_count(), 3);
        assert_eq!(track.offset_for(2), 0.0);
    }

    #[test]
    fn short_content_never_scrolls() {
        let track = Track::new(2, 100.0, 900.0);
        assert_eq!(track.max_offset(), 0.0);
        assert_eq!(track.stop_count(), 1);
        assert_eq!(track.wrap(0, 1), 0);
    }

    #[test]
    fn empty_track_is_inert() {
        let track = Track::new(0, 300.0, 900.0);
        assert_eq!(track.wrap(0, 1), 0);
        assert_eq!(track.wrap(0, -1), 0);
        assert_eq!(track.clamp_index(7), 0);
        assert_eq!(track.cyclic_distance(0, 3), 0);
        assert_eq!(track.stop_count(), 0);
    }

    #[test]
    fn wrap_goes_both_ways() {
        let track = Track::new(4, 300.0, 300.0);
        assert_eq!(track.wrap(3, 1), 0);
        assert_eq!(track.wrap(0, -1), 3);
        assert_eq!(track.wrap(1, 1), 2);
    }

    #[test]
    fn cyclic_distance_takes_short_way_round() {
        let track = Track::new(5, 1.0, 1.0);
        assert_eq!(track.cyclic_distance(0, 1), 1);
        assert_eq!(track.cyclic_distance(0, 4), -1);
        assert_eq!(track.cyclic_distance(4, 0), 1);
        assert_eq!(track.cyclic_distance(2, 2), 0);
        let even = Track::new(4, 1.0, 1.0);
        assert_eq!(even.cyclic_distance(0, 2), 2);
    }
}
