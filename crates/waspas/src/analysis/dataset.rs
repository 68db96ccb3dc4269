use super::domain::{Alternative, Criterion, DecisionMatrix, DecisionProblem};

impl DecisionProblem {
    /// Electroplating system selection: seven coating materials scored on hardness,
    /// thickness, aesthetics, adhesion (benefits) and cost.
    pub fn electroplating() -> Self {
        let criteria = vec![
            Criterion::benefit("H", "Hardness", 0.1761),
            Criterion::benefit("T", "Thickness", 0.2042),
            Criterion::benefit("AE", "Aesthetic", 0.2668),
            Criterion::benefit("AD", "Adhesion", 0.1243),
            Criterion::cost("C", "Cost", 0.2286),
        ];

        let rows: [(&str, [f64; 5]); 7] = [
            ("Silver", [350.0, 20.0, 4.0, 4.0, 2.0]),
            ("Gold", [250.0, 25.0, 5.0, 3.0, 3.0]),
            ("Lead", [150.0, 30.0, 3.0, 1.0, 1.0]),
            ("Rhodium", [400.0, 20.0, 2.0, 3.0, 2.0]),
            ("Nickel", [550.0, 30.0, 1.0, 2.0, 1.0]),
            ("Chromium", [600.0, 35.0, 1.0, 5.0, 1.0]),
            ("Platinum", [580.0, 30.0, 4.0, 4.0, 3.0]),
        ];

        let alternatives = rows
            .iter()
            .map(|(name, values)| {
                Alternative::new(
                    name,
                    criteria
                        .iter()
                        .zip(values.iter())
                        .map(|(criterion, value)| (criterion.key.clone(), *value)),
                )
            })
            .collect::<Vec<_>>();

        Self::new(criteria, DecisionMatrix::new(alternatives))
    }
}
