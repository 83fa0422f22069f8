use super::easing::{clamp01, ease_out_cubic, lerp};

const SCRAMBLE_GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'K', 'M', 'N', 'P', 'R', 'S', 'T', 'X', 'Z', '0', '1',
    '2', '3', '4', '5', '7', '8', '#', '%', '&', '*', '+', '/', '<', '>', '=',
];

#[derive(Clone, Debug, PartialEq)]
pub struct ScrambleText {
    target: Vec<char>,
    seed: u64,
    churn: u32,
}

impl ScrambleText {
    pub fn new(target: &str, seed: u64) -> Self {
        Self {
            target: target.chars().collect(),
            seed,
            churn: 3,
        }
    }

    pub fn target(&self) -> String {
        self.target.iter().collect()
    }

    /// Renders the text at `progress`. Whitespace is never scrambled so
    /// line breaks do not jump around while the effect runs.
    pub fn frame(&self, progress: f64) -> String {
        let progress = clamp01(progress);
        if progress >= 1.0 {
            return self.target();
        }

        let len = self.target.len();
        let position = progress * len as f64;
        let resolved = position.floor() as usize;
        let step = (position * f64::from(self.churn)).floor() as u64;

        self.target
            .iter()
            .enumerate()
            .map(|(index, &ch)| {
                if index < resolved || ch.is_whitespace() {
                    ch
                } else {
                    let noise = mix(self.seed ^ (index as u64).wrapping_mul(0x9E37_79B9) ^ step);
                    SCRAMBLE_GLYPHS[(noise % SCRAMBLE_GLYPHS.len() as u64) as usize]
                }
            })
            .collect()
    }
}

fn mix(mut value: u64) -> u64 {
    value ^= value >> 33;
    value = value.wrapping_mul(0xff51_afd7_ed55_8ccd);
    value ^= value >> 33;
    value = value.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    value ^ (value >> 33)
}

#[derive(Clone, Debug, PartialEq)]
pub struct CountUp {
    pub from: f64,
    pub to: f64,
    pub decimals: usize,
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl CountUp {
    pub fn new(to: f64) -> Self {
        Self {
            from: 0.0,
            to,
            decimals: 0,
            prefix: "",
            suffix: "",
        }
    }

    pub fn with_affixes(mut self, prefix: &'static str, suffix: &'static str) -> Self {
        self.prefix = prefix;
        self.suffix = suffix;
        self
    }

    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn value_at(&self, progress: f64) -> f64 {
        lerp(self.from, self.to, ease_out_cubic(progress))
    }

    pub fn format(&self, progress: f64) -> String {
        let value = self.value_at(progress);
        format!(
            "{}{}{}",
            self.prefix,
            group_thousands(&format!("{value:.prec$}", prec = self.decimals)),
            self.suffix
        )
    }
}

fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
