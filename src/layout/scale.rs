#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f32, f32),
    range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    /// Domain `[0, count - 1]` onto `[-half_step * count, half_step * count]`, so
    /// spacing widens as the group grows.
    pub fn spread(count: usize, half_step: f32) -> Self {
        let count = count as f32;
        Self::new((0.0, count - 1.0), (-half_step * count, half_step * count))
    }

    pub fn map(&self, value: f32) -> f32 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        r0 + (r1 - r0) * t
    }

    pub fn map_index(&self, index: usize) -> f32 {
        self.map(index as f32)
    }
}
