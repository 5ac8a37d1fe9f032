/// Row-major flat grid. No per-cell objects.
#[derive(Clone, Debug)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Cell for signed coordinates, `None` off the edge. No wrapping.
    #[inline]
    pub fn cell(&self, x: i64, y: i64) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.w as i64 || y >= self.h as i64 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    pub fn row(&self, y: usize) -> &[T] {
        &self.data[y * self.w..(y + 1) * self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_outside_are_rejected() {
        let grid: Grid<u8> = Grid::new(4, 3);
        assert_eq!(grid.cell(3, 2), Some((3, 2)));
        assert_eq!(grid.cell(-1, 0), None);
        assert_eq!(grid.cell(4, 0), None);
        assert_eq!(grid.cell(0, 3), None);
    }

    #[test]
    fn rows_are_contiguous() {
        let mut grid: Grid<u8> = Grid::new(3, 2);
        grid.set(1, 1, 7);
        assert_eq!(grid.row(1), &[0, 7, 0]);
        assert_eq!(grid.get(1, 1), 7);
    }
}
