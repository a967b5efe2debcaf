use latex_rpn::LATEX_COMMANDS;
use lazy_static::lazy_static;
use rand::distributions::{Alphanumeric, Slice};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::WeightedIndex;

pub const EXAMPLES: [&str; 3] = [
    r"(((3*\sin(\pi^2))+1)/2)",
    r"((\sqrt(x_1^{2})) - (-y_{ab}))",
    r"[\ln(\alpha \cdot 10) \div \exp(t)]",
];

/// Command soup, mostly not valid as a whole expression
fn random_string<V>(rng: &mut impl Rng, commands: &[(&str, V)]) -> String {
    let command = Slice::new(commands).unwrap();
    let choice = WeightedIndex::new([1, 1, 3]).unwrap();

    let mut res = String::new();
    for _ in 0..30 {
        match rng.sample(&choice) {
            0 => res.push(' '),
            1 => res.push(rng.sample(Alphanumeric).into()),
            2 => res.push_str(rng.sample(&command).0),
            _ => unreachable!(),
        }
    }
    res
}

/// A fully parenthesized expression that goes through every stage
fn random_expression(rng: &mut impl Rng, depth: usize) -> String {
    let leaf = Slice::new(&["x", "y_1", r"\pi", "2", "10"]).unwrap();
    let binary = Slice::new(&["+", "-", "*", "/", "^", r"\cdot"]).unwrap();
    let unary = Slice::new(&[r"\sin", r"\ln", r"\sqrt", "-"]).unwrap();
    let choice = WeightedIndex::new([1, 3, 1]).unwrap();

    if depth == 0 {
        return format!("({})", rng.sample(&leaf));
    }
    match rng.sample(&choice) {
        0 => format!("({})", rng.sample(&leaf)),
        1 => format!(
            "({} {} {})",
            random_expression(rng, depth - 1),
            rng.sample(&binary),
            random_expression(rng, depth - 1)
        ),
        2 => format!(
            "({}{})",
            rng.sample(&unary),
            random_expression(rng, depth - 1)
        ),
        _ => unreachable!(),
    }
}

lazy_static! {
    pub static ref RANDOM_EXAMPLES: [String; 30] = {
        let mut rng = StdRng::from_seed([0; 32]);
        [(); 30].map(|_| random_string(&mut rng, &LATEX_COMMANDS))
    };
    pub static ref RANDOM_EXPRESSIONS: [String; 30] = {
        let mut rng = StdRng::from_seed([0; 32]);
        [(); 30].map(|_| random_expression(&mut rng, 6))
    };
}
