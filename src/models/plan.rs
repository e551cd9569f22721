/// A membership plan offered on the pricing page. Prices are in rupees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    pub price: u32,
    pub duration: &'static str,
    pub features: &'static [&'static str],
    pub popular: bool,
}

pub static PLANS: [Plan; 3] = [
    Plan {
        name: "Basic",
        price: 999,
        duration: "1 Month",
        features: &["Gym Access", "Locker Facility", "Basic Support"],
        popular: false,
    },
    Plan {
        name: "Standard",
        price: 2499,
        duration: "3 Months",
        features: &["Gym Access", "Locker Facility", "Trainer Guidance", "Diet Tips"],
        popular: true,
    },
    Plan {
        name: "Premium",
        price: 4499,
        duration: "6 Months",
        features: &[
            "Unlimited Access",
            "Personal Trainer",
            "Diet Plan",
            "Steam & Sauna",
            "Priority Support",
        ],
        popular: false,
    },
];

/// Look up a plan by name, ignoring case and surrounding whitespace.
pub fn find(name: &str) -> Option<&'static Plan> {
    let name = name.trim();
    PLANS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

pub fn all() -> &'static [Plan] {
    &PLANS
}
