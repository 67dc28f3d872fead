mod testimonial_repo;

pub use testimonial_repo::TestimonialRepo;
