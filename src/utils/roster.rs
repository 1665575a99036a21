use std::collections::HashMap;

/// Team pairings and display names for one season. Built once at startup
/// and handed to the analytics layer.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    teams: Vec<(String, Vec<String>)>,
    names: HashMap<String, String>,
}

const TEAMS_2024: [(&str, [&str; 2]); 10] = [
    ("red_bull", ["max_verstappen", "perez"]),
    ("ferrari", ["leclerc", "sainz"]),
    ("mercedes", ["hamilton", "russell"]),
    ("mclaren", ["norris", "piastri"]),
    ("aston_martin", ["alonso", "stroll"]),
    ("alpine", ["ocon", "gasly"]),
    ("alfa_romeo", ["bottas", "zhou"]),
    ("haas", ["magnussen", "hulkenberg"]),
    ("williams", ["albon", "sargeant"]),
    ("rb", ["ricciardo", "tsunoda"]),
];

const NAMES_2024: [(&str, &str); 20] = [
    ("max_verstappen", "Max Verstappen"),
    ("perez", "Sergio Perez"),
    ("leclerc", "Charles Leclerc"),
    ("sainz", "Carlos Sainz"),
    ("norris", "Lando Norris"),
    ("piastri", "Oscar Piastri"),
    ("hamilton", "Lewis Hamilton"),
    ("russell", "George Russell"),
    ("alonso", "Fernando Alonso"),
    ("stroll", "Lance Stroll"),
    ("ocon", "Esteban Ocon"),
    ("gasly", "Pierre Gasly"),
    ("bottas", "Valtteri Bottas"),
    ("zhou", "Guanyu Zhou"),
    ("magnussen", "Kevin Magnussen"),
    ("hulkenberg", "Nico Hulkenberg"),
    ("albon", "Alexander Albon"),
    ("sargeant", "Logan Sargeant"),
    ("ricciardo", "Daniel Ricciardo"),
    ("tsunoda", "Yuki Tsunoda"),
];

impl Roster {
    pub fn new<T, N>(teams: T, names: N) -> Self
    where
        T: IntoIterator<Item = (String, Vec<String>)>,
        N: IntoIterator<Item = (String, String)>,
    {
        Self {
            teams: teams.into_iter().collect(),
            names: names.into_iter().collect(),
        }
    }

    pub fn season_2024() -> Self {
        Self::new(
            TEAMS_2024.iter().map(|(team, drivers)| {
                (team.to_string(), drivers.iter().map(|d| d.to_string()).collect())
            }),
            NAMES_2024
                .iter()
                .map(|(id, name)| (id.to_string(), name.to_string())),
        )
    }

    pub fn team_of(&self, driver_id: &str) -> Option<&str> {
        self.teams
            .iter()
            .find(|(_, drivers)| drivers.iter().any(|d| d == driver_id))
            .map(|(team, _)| team.as_str())
    }

    /// The single other driver on `driver_id`'s team. Rosters that do not
    /// pair the driver with exactly one teammate yield `None`.
    pub fn teammate_of(&self, driver_id: &str) -> Option<&str> {
        let (_, drivers) = self
            .teams
            .iter()
            .find(|(_, drivers)| drivers.iter().any(|d| d == driver_id))?;
        let mut others = drivers.iter().filter(|d| *d != driver_id);
        match (others.next(), others.next()) {
            (Some(teammate), None) => Some(teammate.as_str()),
            _ => None,
        }
    }

    /// Display name for an id; unknown ids are returned unchanged.
    pub fn driver_name<'a>(&'a self, driver_id: &'a str) -> &'a str {
        self.names
            .get(driver_id)
            .map(String::as_str)
            .unwrap_or(driver_id)
    }
}
