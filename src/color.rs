// Simple color struct, RGB bytes plus an alpha in 0..=1 as the canvas expects it

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 0xff,
        g: 0xff,
        b: 0xff,
        a: 1.0,
    };

    pub fn with_alpha(self, a: f64) -> Color {
        Color { a, ..self }
    }

    // CSS color string for fillStyle / strokeStyle
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
