use super::base::Service;

#[derive(Clone)]
pub(crate) struct FnService<F>(pub(crate) F);

impl<F, Request, Response, Error> Service<Request> for FnService<F>
where
    F: FnMut(Request) -> Result<Response, Error>,
{
    type Response = Response;
    type Error = Error;

    #[inline]
    fn call(&mut self, request: Request) -> Result<Self::Response, Self::Error> {
        self.0(request)
    }
}
