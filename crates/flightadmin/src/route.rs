//! Navigation targets.
//!
//! Every page of the administration surface has a path. Views report where to
//! go next as a [`Route`], and `flightadm open PATH` renders the view for one.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::Id;

/// A page of the administration surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/`
    Home,
    /// `/airlines`
    Airlines,
    /// `/airlines/:id`
    Airline(Id),
    /// `/create-airline`
    CreateAirline,
    /// `/aircrafts`
    Aircrafts,
    /// `/aircrafts/:id`
    Aircraft(Id),
    /// `/create-aircraft`
    CreateAircraft,
    /// `/pilots`
    Pilots,
    /// `/pilots/:id`
    Pilot(Id),
    /// `/create-pilot`
    CreatePilot,
    /// `/flights`
    Flights,
    /// `/flights/:id`
    Flight(Id),
    /// `/create-flight`
    CreateFlight,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "/"),
            Self::Airlines => write!(f, "/airlines"),
            Self::Airline(id) => write!(f, "/airlines/{id}"),
            Self::CreateAirline => write!(f, "/create-airline"),
            Self::Aircrafts => write!(f, "/aircrafts"),
            Self::Aircraft(id) => write!(f, "/aircrafts/{id}"),
            Self::CreateAircraft => write!(f, "/create-aircraft"),
            Self::Pilots => write!(f, "/pilots"),
            Self::Pilot(id) => write!(f, "/pilots/{id}"),
            Self::CreatePilot => write!(f, "/create-pilot"),
            Self::Flights => write!(f, "/flights"),
            Self::Flight(id) => write!(f, "/flights/{id}"),
            Self::CreateFlight => write!(f, "/create-flight"),
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Parse a path. A trailing slash is ignored; the leading one is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_matches('/');
        let segments: Vec<&str> = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        };

        let route = match segments.as_slice() {
            [] => Self::Home,
            ["airlines"] => Self::Airlines,
            ["airlines", id] => Self::Airline(parse_id(id, s)?),
            ["create-airline"] => Self::CreateAirline,
            ["aircrafts"] => Self::Aircrafts,
            ["aircrafts", id] => Self::Aircraft(parse_id(id, s)?),
            ["create-aircraft"] => Self::CreateAircraft,
            ["pilots"] => Self::Pilots,
            ["pilots", id] => Self::Pilot(parse_id(id, s)?),
            ["create-pilot"] => Self::CreatePilot,
            ["flights"] => Self::Flights,
            ["flights", id] => Self::Flight(parse_id(id, s)?),
            ["create-flight"] => Self::CreateFlight,
            _ => return Err(Error::validation(format!("no page at {s:?}"))),
        };
        Ok(route)
    }
}

fn parse_id(segment: &str, path: &str) -> Result<Id, Error> {
    segment
        .parse()
        .map_err(|_| Error::validation(format!("{segment:?} in {path:?} is not an identifier")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("/airlines".parse::<Route>().unwrap(), Route::Airlines);
        assert_eq!("/airlines/3".parse::<Route>().unwrap(), Route::Airline(3));
        assert_eq!("aircrafts/7/".parse::<Route>().unwrap(), Route::Aircraft(7));
        assert_eq!(
            "/create-flight".parse::<Route>().unwrap(),
            Route::CreateFlight
        );
        assert_eq!("/flights/12".parse::<Route>().unwrap(), Route::Flight(12));
    }

    #[test]
    fn test_display_matches_parse() {
        let routes = [
            Route::Home,
            Route::Airline(1),
            Route::CreateAircraft,
            Route::Pilot(5),
            Route::CreatePilot,
            Route::Flights,
        ];
        for route in routes {
            assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_rejects_unknown_paths() {
        assert!("/hangars".parse::<Route>().is_err());
        assert!("/flights/abc".parse::<Route>().is_err());
        assert!("/flights/1/pilot".parse::<Route>().is_err());
        assert!("/create-airline/2".parse::<Route>().is_err());
    }
}
