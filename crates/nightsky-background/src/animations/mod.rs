pub mod shooting_stars;
pub mod star_field;
