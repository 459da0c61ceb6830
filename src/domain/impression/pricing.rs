/// Cost per 1K tokens, split by input/output rate.
/// Unlisted models are billed at the gpt-4o rate.
const PRICING: &[(&str, f64, f64)] = &[
    ("gpt-4o", 0.005, 0.015),
    ("gpt-4o-mini", 0.00015, 0.0006),
    ("gpt-3.5-turbo", 0.001, 0.002),
];

const DEFAULT_RATES: (f64, f64) = (0.005, 0.015);

/// Dollar cost of one generation for the given model
pub fn cost_for(model: &str, prompt_tokens: i64, completion_tokens: i64) -> f64 {
    let (input_rate, output_rate) = PRICING
        .iter()
        .find(|(name, _, _)| *name == model)
        .map(|(_, input, output)| (*input, *output))
        .unwrap_or(DEFAULT_RATES);

    (prompt_tokens as f64 / 1000.0) * input_rate + (completion_tokens as f64 / 1000.0) * output_rate
}
