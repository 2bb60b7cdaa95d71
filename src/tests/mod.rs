#[cfg(test)]
pub mod common;








#[cfg(test)]
mod test_species;



#[cfg(test)]
mod test_pipeline;
