/// 单次三轴加速度读数，单位 g (1g = 9.81 m/s^2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 欧几里得模长 sqrt(x² + y² + z²)
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// 取某一轴的分量
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Names one of the three parallel per-axis sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 显示顺序
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn label(&self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_of_unit_vectors() {
        assert_eq!(Sample::new(0.0, 0.0, 1.0).magnitude(), 1.0);
        assert!((Sample::new(1.0, 1.0, 1.0).magnitude() - 3f64.sqrt()).abs() < 1e-12);
        assert_eq!(Sample::new(3.0, 4.0, 0.0).magnitude(), 5.0);
    }

    #[test]
    fn component_follows_axis() {
        let s = Sample::new(0.1, -0.2, 0.98);
        let parts: Vec<f64> = Axis::ALL.iter().map(|&a| s.component(a)).collect();
        assert_eq!(parts, vec![0.1, -0.2, 0.98]);
    }
}
