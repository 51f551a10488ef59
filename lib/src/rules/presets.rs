//! Some well-known rules.

use super::{moore, CountRange, CountSet, Hrot, Ltl, Rule};
use crate::neighborhood::{Neighborhood, Shape};

impl Hrot {
    /// Conway's Game of Life, `B3/S23`.
    pub fn life() -> Self {
        Rule {
            neighborhood: moore(),
            births: CountSet::new(&[3]),
            survivals: CountSet::new(&[2, 3]),
            max_state: 1,
            middle: false,
        }
    }

    /// Brian's Brain, `/2/3`.
    pub fn brians_brain() -> Self {
        Rule {
            neighborhood: moore(),
            births: CountSet::new(&[2]),
            survivals: CountSet::new(&[]),
            max_state: 2,
            middle: false,
        }
    }
}

impl Ltl {
    fn preset(radius: u32, middle: bool, survivals: (u32, u32), births: (u32, u32)) -> Self {
        Rule {
            neighborhood: Neighborhood::build(Shape::Square, radius),
            births: CountRange::new(births.0, births.1),
            survivals: CountRange::new(survivals.0, survivals.1),
            max_state: 1,
            middle,
        }
    }

    /// Bosco's Rule, also known as Bugs: `R5,C0,M1,S34..58,B34..45,NM`.
    pub fn bosco() -> Self {
        Ltl::preset(5, true, (34, 58), (34, 45))
    }

    /// Waffle: `R7,C0,M1,S100..200,B75..170,NM`.
    pub fn waffle() -> Self {
        Ltl::preset(7, true, (100, 200), (75, 170))
    }

    /// Majority: `R4,C0,M1,S41..81,B41..81,NM`.
    pub fn majority() -> Self {
        Ltl::preset(4, true, (41, 81), (41, 81))
    }

    /// Globe: `R8,C0,M0,S163..223,B74..252,NM`.
    pub fn globe() -> Self {
        Ltl::preset(8, false, (163, 223), (74, 252))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn presets_are_valid() -> Result<(), Error> {
        let life = Hrot::life();
        assert_eq!(
            Hrot::new(life.neighborhood.clone(), &[3], &[2, 3], 2)?,
            life
        );
        for rule in [Ltl::bosco(), Ltl::waffle(), Ltl::majority(), Ltl::globe()] {
            let checked = Ltl::new(
                rule.neighborhood.clone(),
                rule.births,
                rule.survivals,
                rule.states(),
                rule.middle,
            )?;
            assert_eq!(checked, rule);
        }
        assert_eq!(Ltl::bosco().to_string(), "R5,C0,M1,S34..58,B34..45,NM");
        assert_eq!(Ltl::globe().to_string(), "R8,C0,M0,S163..223,B74..252,NM");
        assert_eq!(Hrot::brians_brain().to_string(), "R1,C3,S,B2,NM");
        Ok(())
    }
}
