//! Dense entity storage
//!
//! Entities live in a flat `Vec` and are removed with `swap_remove`, so a
//! removal costs O(1) and never reallocates. Iteration order is therefore not
//! insertion order once anything has been removed.

use super::geom::Rect;

/// Anything stored in a [`Pool`]
pub trait Entity {
    fn bounds(&self) -> Rect;
}

#[derive(Debug, Clone)]
pub struct Pool<T> {
    items: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True if any stored entity's bounds overlap `rect`
    pub fn any_overlapping(&self, rect: &Rect) -> bool {
        self.items.iter().any(|e| e.bounds().intersects(rect))
    }

    /// Summed overlap area between `rect` and every stored entity
    pub fn overlap_area(&self, rect: &Rect) -> f32 {
        self.items.iter().map(|e| e.bounds().overlap_area(rect)).sum()
    }

    /// Remove every entity for which `remove` returns true, in one pass.
    ///
    /// Each entity is visited exactly once. Returns the number removed.
    pub fn sweep<F>(&mut self, mut remove: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut removed = 0;
        let mut i = 0;
        while i < self.items.len() {
            if remove(&mut self.items[i]) {
                self.items.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }
}

impl<'a, T: Entity> IntoIterator for &'a Pool<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    struct Dot {
        id: u32,
        x: f32,
    }

    impl Entity for Dot {
        fn bounds(&self) -> Rect {
            Rect::new(Vec2::new(self.x, 0.0), Vec2::ONE)
        }
    }

    #[test]
    fn test_sweep_visits_each_once() {
        let mut pool = Pool::new();
        for id in 1..=6 {
            pool.push(Dot { id, x: id as f32 * 10.0 });
        }

        let mut visited = Vec::new();
        let removed = pool.sweep(|d| {
            visited.push(d.id);
            d.id % 2 == 0
        });

        assert_eq!(removed, 3);
        visited.sort_unstable();
        assert_eq!(visited, vec![1, 2, 3, 4, 5, 6]);
        let mut left: Vec<u32> = pool.iter().map(|d| d.id).collect();
        left.sort_unstable();
        assert_eq!(left, vec![1, 3, 5]);
    }

    #[test]
    fn test_overlap_queries() {
        let mut pool = Pool::new();
        pool.push(Dot { id: 1, x: 0.0 });
        let query = Rect::new(Vec2::new(0.5, 0.5), Vec2::ONE);
        assert!(pool.any_overlapping(&query));
        assert!((pool.overlap_area(&query) - 0.25).abs() < 1e-6);
        assert!(!pool.any_overlapping(&Rect::new(Vec2::new(5.0, 0.0), Vec2::ONE)));
    }
}
