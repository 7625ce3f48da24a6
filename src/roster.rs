use std::collections::{BTreeMap, HashMap};

/// Source of team rosters for match setup.
pub trait RosterLookup {
    fn roster(&self, team: &str) -> Option<Vec<String>>;
}

impl RosterLookup for HashMap<String, Vec<String>> {
    fn roster(&self, team: &str) -> Option<Vec<String>> {
        self.get(team).cloned()
    }
}

impl RosterLookup for BTreeMap<String, Vec<String>> {
    fn roster(&self, team: &str) -> Option<Vec<String>> {
        self.get(team).cloned()
    }
}

/// The four clubs the scorer ships with, six players each.
pub fn default_rosters() -> BTreeMap<String, Vec<String>> {
    let clubs: [(&str, [&str; 6]); 4] = [
        ("Shivneri", ["Pradip (C)", "Vijay", "Hardeep", "Yuvraj", "Rahul", "(sub)"]),
        ("Rajgad", ["Paresh (C)", "Ganesh", "Bapu", "Vikas", "Nilesh", "Yogesh"]),
        ("Raigad", ["Amol (C)", "Rajat", "Jay", "Sanjay", "Thombre", "Gaurav"]),
        ("Sinhgad", ["Dinesh (C)", "Sheth", "Pratik", "Akash", "Akshay", "Yash"]),
    ];
    clubs
        .into_iter()
        .map(|(team, players)| {
            (team.to_string(), players.iter().map(|p| p.to_string()).collect())
        })
        .collect()
}
