use image::Rgb;

const NEUTRAL_GRAY: Rgb<u8> = Rgb([200, 200, 200]);

/// Named color schemes mapping (pitch, velocity) to a color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    /// Hue follows pitch class, saturation and value follow velocity.
    #[default]
    Hsv,
    Ocean,
    Forest,
    Sunset,
    /// Soft hues by pitch class, ignores velocity.
    Pastel,
    Grayscale,
    Fire,
    Ice,

    /// Flat gray for names that are not recognized.
    Neutral,
}

/// One of the seven natural letters a pitch class belongs to.
/// Sharps fold onto their base letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    fn of(pitch: u8) -> Self {
        match pitch % 12 {
            0 | 1 => Letter::C,
            2 | 3 => Letter::D,
            4 => Letter::E,
            5 | 6 => Letter::F,
            7 | 8 => Letter::G,
            9 | 10 => Letter::A,
            _ => Letter::B,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

const OCEAN: [[u8; 3]; 7] = [
    [20, 60, 130],
    [40, 120, 180],
    [70, 170, 210],
    [100, 190, 200],
    [120, 200, 190],
    [150, 210, 170],
    [180, 220, 150],
];

const FOREST: [[u8; 3]; 7] = [
    [30, 70, 40],
    [50, 100, 60],
    [80, 130, 80],
    [120, 160, 90],
    [160, 190, 100],
    [190, 210, 110],
    [210, 220, 120],
];

const SUNSET: [[u8; 3]; 7] = [
    [180, 50, 70],
    [200, 80, 60],
    [220, 110, 70],
    [230, 140, 80],
    [240, 170, 90],
    [250, 200, 120],
    [255, 230, 150],
];

impl Palette {
    pub const ALL: [Palette; 8] = [
        Palette::Hsv,
        Palette::Ocean,
        Palette::Forest,
        Palette::Sunset,
        Palette::Pastel,
        Palette::Grayscale,
        Palette::Fire,
        Palette::Ice,
    ];

    pub fn color(self, pitch: u8, velocity: u8) -> Rgb<u8> {
        let ratio = velocity.min(127) as f64 / 127.0;
        let hue = (pitch % 12) as f64 / 12.0;

        match self {
            Palette::Hsv => hsv_to_rgb(hue, 0.7 + ratio * 0.3, 0.6 + ratio * 0.4),
            Palette::Ocean => scale(OCEAN[Letter::of(pitch).index()], 0.5 + ratio * 0.5),
            Palette::Forest => scale(FOREST[Letter::of(pitch).index()], 0.6 + ratio * 0.4),
            Palette::Sunset => scale(SUNSET[Letter::of(pitch).index()], 0.5 + ratio * 0.5),
            Palette::Pastel => hsv_to_rgb(hue, 0.3, 0.9),
            Palette::Grayscale => {
                let level = (50.0 + ratio * 205.0) as u8;
                Rgb([level, level, level])
            }
            Palette::Fire => {
                let heat = ratio * 0.7 + 0.3;
                if heat < 0.5 {
                    Rgb([(255.0 * heat * 2.0) as u8, (100.0 * heat * 2.0) as u8, 0])
                } else {
                    let t = (heat - 0.5) * 2.0;
                    Rgb([255, (100.0 + 155.0 * t) as u8, (100.0 * t) as u8])
                }
            }
            Palette::Ice => {
                let coldness = ratio * 0.7 + 0.3;
                scale([200, 230, 255], coldness)
            }
            Palette::Neutral => NEUTRAL_GRAY,
        }
    }
}

fn scale(base: [u8; 3], intensity: f64) -> Rgb<u8> {
    Rgb(base.map(|c| (c as f64 * intensity).min(255.0) as u8))
}

/// Converts hue, saturation and value in `[0, 1]` to an 8-bit color, truncating each channel.
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb<u8> {
    let to_u8 = |c: f64| (c * 255.0) as u8;

    if s == 0.0 {
        return Rgb([to_u8(v); 3]);
    }

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}
